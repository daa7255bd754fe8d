use serde::Deserialize;

use crate::domain::course::NewCourse;
use crate::forms::{FormError, lenient_bool, lenient_f64, lenient_i32, optional, present};

pub const COURSE_REQUIRED: &str = "Title is required";

/// JSON body of `POST /courses`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCourseForm {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub outcomes: Option<String>,
    pub faqs: Option<String>,
    pub language: Option<String>,
    #[serde(deserialize_with = "lenient_i32")]
    pub category_id: Option<i32>,
    #[serde(deserialize_with = "lenient_i32")]
    pub sub_category_id: Option<i32>,
    pub section: Option<String>,
    pub requirements: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub discount_flag: Option<bool>,
    #[serde(deserialize_with = "lenient_f64")]
    pub discounted_price: Option<f64>,
    pub level: Option<String>,
    #[serde(deserialize_with = "lenient_i32")]
    pub user_id: Option<i32>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub course_type: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_top_course: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_admin: Option<bool>,
    pub status: Option<String>,
    pub course_overview_provider: Option<String>,
    pub meta_keywords: Option<String>,
    pub meta_description: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_free_course: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub multi_instructor: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub enable_drip_content: Option<bool>,
    #[serde(deserialize_with = "lenient_i32")]
    pub creator: Option<i32>,
    #[serde(deserialize_with = "lenient_i32")]
    pub expiry_period: Option<i32>,
    pub upcoming_image_thumbnail: Option<String>,
    pub publish_date: Option<String>,
}

impl TryFrom<CreateCourseForm> for NewCourse {
    type Error = FormError;

    fn try_from(form: CreateCourseForm) -> Result<Self, Self::Error> {
        let title = present(form.title).ok_or(FormError::MissingFields(COURSE_REQUIRED))?;

        Ok(NewCourse {
            short_description: optional(form.short_description),
            description: optional(form.description),
            outcomes: optional(form.outcomes),
            faqs: optional(form.faqs),
            language: optional(form.language),
            category_id: form.category_id,
            sub_category_id: form.sub_category_id,
            section: optional(form.section),
            requirements: optional(form.requirements),
            price: form.price,
            discount_flag: form.discount_flag,
            discounted_price: form.discounted_price,
            level: optional(form.level),
            user_id: form.user_id,
            thumbnail: optional(form.thumbnail),
            video_url: optional(form.video_url),
            course_type: optional(form.course_type),
            is_top_course: form.is_top_course,
            is_admin: form.is_admin,
            status: optional(form.status),
            course_overview_provider: optional(form.course_overview_provider),
            meta_keywords: optional(form.meta_keywords),
            meta_description: optional(form.meta_description),
            is_free_course: form.is_free_course,
            multi_instructor: form.multi_instructor,
            enable_drip_content: form.enable_drip_content,
            creator: form.creator,
            expiry_period: form.expiry_period,
            upcoming_image_thumbnail: optional(form.upcoming_image_thumbnail),
            publish_date: optional(form.publish_date),
            ..NewCourse::new(title)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_the_only_required_field() {
        let form: CreateCourseForm =
            serde_json::from_str(r#"{"title":"Clinical Trials 101","price":"49.90","is_free_course":0}"#)
                .unwrap();

        let course = NewCourse::try_from(form).unwrap();

        assert_eq!(course.title.as_str(), "Clinical Trials 101");
        assert_eq!(course.price, Some(49.9));
        assert_eq!(course.is_free_course, Some(false));
        assert_eq!(course.status, None);
    }

    #[test]
    fn missing_title_is_rejected() {
        let err = NewCourse::try_from(CreateCourseForm::default()).unwrap_err();
        assert_eq!(err.to_string(), COURSE_REQUIRED);
    }
}
