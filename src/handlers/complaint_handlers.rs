use actix_multipart::form::bytes::Bytes as UploadedFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};

use crate::auth::session::{Flash, SessionContext, UserRole};
use crate::auth::validate;
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::complaint::{ComplaintForm, ComplaintRepository};
use crate::tasks;
use crate::templates_structs::{ComplaintFormTemplate, PageContext};
use crate::uploads::{ImageBlobStore, StoredImage};

/// `multipart/form-data` body of the new-complaint page.
#[derive(MultipartForm)]
pub struct ComplaintUpload {
    title: Option<Text<String>>,
    description: Option<Text<String>>,
    location: Option<Text<String>>,
    image_link: Option<Text<String>>,
    coordinates: Option<Text<String>>,
    csrf_token: Option<Text<String>>,
    images: Vec<UploadedFile>,
}

impl ComplaintUpload {
    /// Split into text fields and photos. Browsers send an empty file part
    /// when nothing was picked; those are dropped.
    fn into_parts(self) -> (ComplaintForm, Vec<StoredImage>) {
        let text = |field: Option<Text<String>>| field.map(Text::into_inner).unwrap_or_default();
        let form = ComplaintForm {
            title: text(self.title),
            description: text(self.description),
            location: text(self.location),
            image_link: text(self.image_link),
            coordinates: text(self.coordinates),
            csrf_token: text(self.csrf_token),
        };
        let photos = self
            .images
            .into_iter()
            .filter(|file| !file.data.is_empty())
            .map(|file| StoredImage {
                content_type: file
                    .content_type
                    .map(|mime| mime.essence_str().to_string())
                    .unwrap_or_default(),
                data: file.data,
            })
            .collect();
        (form, photos)
    }
}

pub async fn new_form(session: SessionContext) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, "/complaints/new");
    render(ComplaintFormTemplate::new(ctx, ComplaintForm::default(), vec![]))
}

pub async fn create(
    session: SessionContext,
    store: web::Data<dyn ComplaintRepository>,
    uploads: web::Data<dyn ImageBlobStore>,
    config: web::Data<AppConfig>,
    MultipartForm(upload): MultipartForm<ComplaintUpload>,
) -> Result<HttpResponse, AppError> {
    let (form, photos) = upload.into_parts();
    session.verify_csrf(&form.csrf_token)?;
    let identity = session.require(UserRole::Citizen)?;

    let mut upload_errors: Vec<String> = Vec::new();
    for photo in &photos {
        if let Some(e) =
            validate::validate_upload(&photo.content_type, photo.data.len(), config.max_upload_bytes)
        {
            if !upload_errors.contains(&e) {
                upload_errors.push(e);
            }
        }
    }

    let new = match form.clone().into_new_complaint(identity.token(), photos.len()) {
        Ok(new) if upload_errors.is_empty() => new,
        Ok(_) => {
            let ctx = PageContext::build(&session, "/complaints/new");
            return render(ComplaintFormTemplate::new(ctx, form, upload_errors));
        }
        Err(mut errors) => {
            errors.extend(upload_errors);
            let ctx = PageContext::build(&session, "/complaints/new");
            return render(ComplaintFormTemplate::new(ctx, form, errors));
        }
    };

    // Aborted if the client goes away before the simulated latency elapses.
    let created = tasks::submit_complaint(
        store.into_inner(),
        uploads.into_inner(),
        new,
        photos,
        config.submit_delay,
    )
    .join()
    .await?;

    log::info!(
        "Complaint #{} submitted with {} image(s): {}",
        created.id,
        created.images.len(),
        created.title
    );
    session.flash(Flash::success("Complaint submitted successfully"));
    Ok(see_other(UserRole::Citizen.dashboard_path()))
}
