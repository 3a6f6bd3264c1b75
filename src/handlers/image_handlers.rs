use actix_web::http::header::{self, CacheControl, CacheDirective};
use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::errors::{AppError, see_other};
use crate::images::{placeholder_url, ImageLoader, ReferenceProbe};
use crate::models::complaint::ComplaintRepository;
use crate::uploads::ImageBlobStore;

/// Redirect to the complaint's image at `index`, or to a placeholder captioned
/// with the complaint title once the image is given up on. Only references
/// the probe confirmed are ever redirected to.
pub async fn complaint_image(
    store: web::Data<dyn ComplaintRepository>,
    probe: web::Data<ReferenceProbe>,
    config: web::Data<AppConfig>,
    path: web::Path<(i64, usize)>,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();
    let complaint = store.find(id).ok_or(AppError::NotFound)?;

    let target = match complaint.images.get(index) {
        Some(src) => {
            ImageLoader::new(src, &complaint.title, &config.placeholder_color, config.image_retry)
                .settle(probe.get_ref())
                .await
        }
        None => placeholder_url(&complaint.title, &config.placeholder_color),
    };
    Ok(see_other(&target))
}

/// Serve an uploaded complaint photo.
pub async fn uploaded_image(
    uploads: web::Data<dyn ImageBlobStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let image = uploads.get(&path.into_inner()).ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, image.content_type))
        .insert_header(CacheControl(vec![CacheDirective::Private, CacheDirective::MaxAge(86_400)]))
        .insert_header(("X-Content-Type-Options", "nosniff"))
        .body(image.data))
}
