use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::NonEmptyString;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub category_id: i32,
    pub author_id: i32,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub keywords: Option<String>,
    pub content: String,
    pub thumbnail_url: Option<String>,
    pub banner_url: Option<String>,
    pub is_popular: bool,
    pub status: String,
    pub short_description: Option<String>,
    pub reading_time: Option<i32>,
    pub image_alt_text: Option<String>,
    pub image_caption: Option<String>,
    pub publish_date: Option<String>,
    pub visibility: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub focus_keyword: Option<String>,
    pub canonical_url: Option<String>,
    pub meta_robots: Option<String>,
    pub allow_comments: bool,
    pub show_on_homepage: bool,
    pub is_sticky: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Validated blog submission. Unset flags and enums fall back to the column
/// defaults (`draft`, `private`, comments allowed).
#[derive(Clone, Debug, PartialEq)]
pub struct NewBlog {
    pub title: NonEmptyString,
    pub slug: NonEmptyString,
    pub category_id: i32,
    pub author_id: i32,
    pub content: NonEmptyString,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub keywords: Option<String>,
    pub thumbnail_url: Option<String>,
    pub banner_url: Option<String>,
    pub is_popular: Option<bool>,
    pub status: Option<String>,
    pub short_description: Option<String>,
    pub reading_time: Option<i32>,
    pub image_alt_text: Option<String>,
    pub image_caption: Option<String>,
    pub publish_date: Option<String>,
    pub visibility: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub focus_keyword: Option<String>,
    pub canonical_url: Option<String>,
    pub meta_robots: Option<String>,
    pub allow_comments: Option<bool>,
    pub show_on_homepage: Option<bool>,
    pub is_sticky: Option<bool>,
}

impl NewBlog {
    /// Builds a submission with only the required fields set.
    pub fn new(
        title: NonEmptyString,
        slug: NonEmptyString,
        category_id: i32,
        author_id: i32,
        content: NonEmptyString,
    ) -> Self {
        Self {
            title,
            slug,
            category_id,
            author_id,
            content,
            author_name: None,
            author_email: None,
            keywords: None,
            thumbnail_url: None,
            banner_url: None,
            is_popular: None,
            status: None,
            short_description: None,
            reading_time: None,
            image_alt_text: None,
            image_caption: None,
            publish_date: None,
            visibility: None,
            seo_title: None,
            seo_description: None,
            focus_keyword: None,
            canonical_url: None,
            meta_robots: None,
            allow_comments: None,
            show_on_homepage: None,
            is_sticky: None,
        }
    }
}
