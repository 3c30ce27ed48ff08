use actix_web::{web, HttpResponse};
use meal_menu::config::SiteConfig;
use meal_menu::group::MenuGroup;
use meal_menu::provider::MenuSource;
use meal_menu::render;
use meal_menu::view::{MenuView, ViewState};

pub(super) struct ApiState {
    site: SiteConfig,
    initial: ViewState,
}

impl ApiState {
    /// Fetches the menu once; later requests only read it.
    pub(super) async fn load(source: &MenuSource, site: SiteConfig) -> Self {
        let view = MenuView::mount(source).await;
        Self::new(site, view.into_state())
    }

    pub(super) fn new(site: SiteConfig, initial: ViewState) -> Self {
        Self { site, initial }
    }

    fn view_for(&self, selected: Option<String>) -> MenuView {
        let mut view = MenuView::from_state(self.initial.clone());
        if let Some(selected) = selected {
            view.select_category(selected);
        }
        view
    }
}

#[derive(serde::Serialize)]
struct ErrJsonResp {
    message: String,
}

#[derive(serde::Deserialize)]
pub(super) struct PageQuery {
    category: Option<String>,
}

#[actix_web::get("/")]
pub(super) async fn index(
    data: web::Data<ApiState>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let view = data.view_for(query.into_inner().category);
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render::render_page(&data.site, view.state()))
}

#[actix_web::get("/api/v1/menu")]
pub(super) async fn menu(data: web::Data<ApiState>) -> HttpResponse {
    if let Some(reason) = &data.initial.unavailable {
        HttpResponse::ServiceUnavailable().json(ErrJsonResp {
            message: reason.clone(),
        })
    } else {
        HttpResponse::Ok().json(&*data.initial.menu)
    }
}

#[derive(serde::Serialize)]
struct CategoryResp<'a> {
    category: &'a str,
    grouped: bool,
    groups: Vec<MenuGroup<'a>>,
}

#[derive(serde::Deserialize)]
pub(super) struct CategoryPath {
    category: String,
}

#[actix_web::get("/api/v1/menu/{category}")]
pub(super) async fn category(
    data: web::Data<ApiState>,
    path: web::Path<CategoryPath>,
) -> HttpResponse {
    if let Some(reason) = &data.initial.unavailable {
        return HttpResponse::ServiceUnavailable().json(ErrJsonResp {
            message: reason.clone(),
        });
    }
    let view = data.view_for(Some(path.into_inner().category));
    let state = view.state();
    HttpResponse::Ok().json(CategoryResp {
        category: &state.selected,
        grouped: state.grouping_mode().shows_headers(),
        groups: state.visible_groups(),
    })
}
