use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::blog::{Blog as DomainBlog, NewBlog as DomainNewBlog};

/// Projection used by raw listing statements; mirrors the fields of [`Blog`].
pub const COLUMNS: &str = "id, title, slug, category_id, author_id, author_name, author_email, \
     keywords, content, thumbnail_url, banner_url, is_popular, status, short_description, \
     reading_time, image_alt_text, image_caption, publish_date, visibility, seo_title, \
     seo_description, focus_keyword, canonical_url, meta_robots, allow_comments, \
     show_on_homepage, is_sticky, created_at, updated_at";

#[derive(Debug, Clone, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = crate::schema::blogs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
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

/// Insertable form of [`Blog`]. `None` leaves the column default in place.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::blogs)]
pub struct NewBlog<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub category_id: i32,
    pub author_id: i32,
    pub author_name: Option<&'a str>,
    pub author_email: Option<&'a str>,
    pub keywords: Option<&'a str>,
    pub content: &'a str,
    pub thumbnail_url: Option<&'a str>,
    pub banner_url: Option<&'a str>,
    pub is_popular: Option<bool>,
    pub status: Option<&'a str>,
    pub short_description: Option<&'a str>,
    pub reading_time: Option<i32>,
    pub image_alt_text: Option<&'a str>,
    pub image_caption: Option<&'a str>,
    pub publish_date: Option<&'a str>,
    pub visibility: Option<&'a str>,
    pub seo_title: Option<&'a str>,
    pub seo_description: Option<&'a str>,
    pub focus_keyword: Option<&'a str>,
    pub canonical_url: Option<&'a str>,
    pub meta_robots: Option<&'a str>,
    pub allow_comments: Option<bool>,
    pub show_on_homepage: Option<bool>,
    pub is_sticky: Option<bool>,
}

impl From<Blog> for DomainBlog {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            slug: blog.slug,
            category_id: blog.category_id,
            author_id: blog.author_id,
            author_name: blog.author_name,
            author_email: blog.author_email,
            keywords: blog.keywords,
            content: blog.content,
            thumbnail_url: blog.thumbnail_url,
            banner_url: blog.banner_url,
            is_popular: blog.is_popular,
            status: blog.status,
            short_description: blog.short_description,
            reading_time: blog.reading_time,
            image_alt_text: blog.image_alt_text,
            image_caption: blog.image_caption,
            publish_date: blog.publish_date,
            visibility: blog.visibility,
            seo_title: blog.seo_title,
            seo_description: blog.seo_description,
            focus_keyword: blog.focus_keyword,
            canonical_url: blog.canonical_url,
            meta_robots: blog.meta_robots,
            allow_comments: blog.allow_comments,
            show_on_homepage: blog.show_on_homepage,
            is_sticky: blog.is_sticky,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewBlog> for NewBlog<'a> {
    fn from(blog: &'a DomainNewBlog) -> Self {
        Self {
            title: blog.title.as_str(),
            slug: blog.slug.as_str(),
            category_id: blog.category_id,
            author_id: blog.author_id,
            author_name: blog.author_name.as_deref(),
            author_email: blog.author_email.as_deref(),
            keywords: blog.keywords.as_deref(),
            content: blog.content.as_str(),
            thumbnail_url: blog.thumbnail_url.as_deref(),
            banner_url: blog.banner_url.as_deref(),
            is_popular: blog.is_popular,
            status: blog.status.as_deref(),
            short_description: blog.short_description.as_deref(),
            reading_time: blog.reading_time,
            image_alt_text: blog.image_alt_text.as_deref(),
            image_caption: blog.image_caption.as_deref(),
            publish_date: blog.publish_date.as_deref(),
            visibility: blog.visibility.as_deref(),
            seo_title: blog.seo_title.as_deref(),
            seo_description: blog.seo_description.as_deref(),
            focus_keyword: blog.focus_keyword.as_deref(),
            canonical_url: blog.canonical_url.as_deref(),
            meta_robots: blog.meta_robots.as_deref(),
            allow_comments: blog.allow_comments,
            show_on_homepage: blog.show_on_homepage,
            is_sticky: blog.is_sticky,
        }
    }
}
