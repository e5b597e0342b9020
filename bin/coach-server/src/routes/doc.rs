use crate::routes::{chat, export, health, session};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "coach-server",
    description = "Career coach chat and roadmap export API",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(chat::ChatApi::openapi());
    root.merge(export::ExportApi::openapi());
    root.merge(session::SessionApi::openapi());
    root
}
