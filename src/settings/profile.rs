//! Reading the profile form and turning an uploaded picture into a data URL.

use axum::extract::{Multipart, multipart::Field};
use base64::{Engine, engine::general_purpose::STANDARD};
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

/// The initials shown in place of a missing profile picture, e.g. "AS" for "Ana Souza".
///
/// Takes the first letter of each word, upper-cased, up to two letters.
/// Returns "?" when there is no name.
pub fn initials(name: Option<&str>) -> String {
    let initials = name
        .unwrap_or_default()
        .split_whitespace()
        .filter_map(|word| word.graphemes(true).next())
        .take(2)
        .collect::<String>()
        .to_uppercase();

    if initials.is_empty() {
        "?".to_owned()
    } else {
        initials
    }
}

/// A picture uploaded with the profile form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// The image as a "data:<mime>;base64,<data>" URL, the format the API stores.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.data))
    }
}

/// The fields of the profile form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    /// `None` when the user did not choose a new picture.
    pub image: Option<ImageUpload>,
}

impl ProfileForm {
    /// Read the profile form from a multipart request.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [Error::MultipartError] if the request cannot be read.
    /// - [Error::EmptyField] if the name is missing or blank.
    /// - [Error::NotAnImage] if the uploaded file is not an image.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, Error> {
        let mut name = None;
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|error| Error::MultipartError(error.body_text()))?
        {
            match field.name() {
                Some("name") => {
                    let text = field
                        .text()
                        .await
                        .map_err(|error| Error::MultipartError(error.body_text()))?;
                    name = Some(text.trim().to_owned());
                }
                Some("profile_image") => image = parse_image_field(field).await?,
                other => tracing::debug!("Ignoring unexpected profile form field {other:?}"),
            }
        }

        let name = name
            .filter(|name| !name.is_empty())
            .ok_or(Error::EmptyField("Name"))?;

        Ok(Self { name, image })
    }
}

async fn parse_image_field(field: Field<'_>) -> Result<Option<ImageUpload>, Error> {
    let content_type = field.content_type().unwrap_or_default().to_owned();
    let data = field
        .bytes()
        .await
        .map_err(|error| Error::MultipartError(error.body_text()))?;

    // Browsers send an empty part when no file was chosen.
    if data.is_empty() {
        return Ok(None);
    }

    if !content_type.starts_with("image/") {
        return Err(Error::NotAnImage);
    }

    tracing::debug!("Received {content_type} profile picture that is {} bytes", data.len());

    Ok(Some(ImageUpload {
        content_type,
        data: data.to_vec(),
    }))
}
