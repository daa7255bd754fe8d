use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::NonEmptyString;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub outcomes: Option<String>,
    pub faqs: Option<String>,
    pub language: Option<String>,
    pub category_id: Option<i32>,
    pub sub_category_id: Option<i32>,
    pub section: Option<String>,
    pub requirements: Option<String>,
    pub price: Option<f64>,
    pub discount_flag: bool,
    pub discounted_price: Option<f64>,
    pub level: Option<String>,
    pub user_id: Option<i32>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub date_added: NaiveDateTime,
    pub last_modified: NaiveDateTime,
    pub course_type: Option<String>,
    pub is_top_course: bool,
    pub is_admin: bool,
    pub status: String,
    pub course_overview_provider: Option<String>,
    pub meta_keywords: Option<String>,
    pub meta_description: Option<String>,
    pub is_free_course: bool,
    pub multi_instructor: bool,
    pub enable_drip_content: bool,
    pub creator: Option<i32>,
    pub expiry_period: Option<i32>,
    pub upcoming_image_thumbnail: Option<String>,
    pub publish_date: Option<String>,
}

/// Validated course submission; only the title is mandatory.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCourse {
    pub title: NonEmptyString,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub outcomes: Option<String>,
    pub faqs: Option<String>,
    pub language: Option<String>,
    pub category_id: Option<i32>,
    pub sub_category_id: Option<i32>,
    pub section: Option<String>,
    pub requirements: Option<String>,
    pub price: Option<f64>,
    pub discount_flag: Option<bool>,
    pub discounted_price: Option<f64>,
    pub level: Option<String>,
    pub user_id: Option<i32>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub course_type: Option<String>,
    pub is_top_course: Option<bool>,
    pub is_admin: Option<bool>,
    pub status: Option<String>,
    pub course_overview_provider: Option<String>,
    pub meta_keywords: Option<String>,
    pub meta_description: Option<String>,
    pub is_free_course: Option<bool>,
    pub multi_instructor: Option<bool>,
    pub enable_drip_content: Option<bool>,
    pub creator: Option<i32>,
    pub expiry_period: Option<i32>,
    pub upcoming_image_thumbnail: Option<String>,
    pub publish_date: Option<String>,
}

impl NewCourse {
    pub fn new(title: NonEmptyString) -> Self {
        Self {
            title,
            short_description: None,
            description: None,
            outcomes: None,
            faqs: None,
            language: None,
            category_id: None,
            sub_category_id: None,
            section: None,
            requirements: None,
            price: None,
            discount_flag: None,
            discounted_price: None,
            level: None,
            user_id: None,
            thumbnail: None,
            video_url: None,
            course_type: None,
            is_top_course: None,
            is_admin: None,
            status: None,
            course_overview_provider: None,
            meta_keywords: None,
            meta_description: None,
            is_free_course: None,
            multi_instructor: None,
            enable_drip_content: None,
            creator: None,
            expiry_period: None,
            upcoming_image_thumbnail: None,
            publish_date: None,
        }
    }
}
