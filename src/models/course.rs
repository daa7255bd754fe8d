use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::course::{Course as DomainCourse, NewCourse as DomainNewCourse};

/// Projection used by raw listing statements; mirrors the fields of [`Course`].
pub const COLUMNS: &str = "id, title, short_description, description, outcomes, faqs, language, \
     category_id, sub_category_id, section, requirements, price, discount_flag, \
     discounted_price, level, user_id, thumbnail, video_url, date_added, \
     last_modified, course_type, is_top_course, is_admin, status, \
     course_overview_provider, meta_keywords, meta_description, is_free_course, \
     multi_instructor, enable_drip_content, creator, expiry_period, \
     upcoming_image_thumbnail, publish_date";

#[derive(Debug, Clone, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = crate::schema::courses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::courses)]
pub struct NewCourse<'a> {
    pub title: &'a str,
    pub short_description: Option<&'a str>,
    pub description: Option<&'a str>,
    pub outcomes: Option<&'a str>,
    pub faqs: Option<&'a str>,
    pub language: Option<&'a str>,
    pub category_id: Option<i32>,
    pub sub_category_id: Option<i32>,
    pub section: Option<&'a str>,
    pub requirements: Option<&'a str>,
    pub price: Option<f64>,
    pub discount_flag: Option<bool>,
    pub discounted_price: Option<f64>,
    pub level: Option<&'a str>,
    pub user_id: Option<i32>,
    pub thumbnail: Option<&'a str>,
    pub video_url: Option<&'a str>,
    pub course_type: Option<&'a str>,
    pub is_top_course: Option<bool>,
    pub is_admin: Option<bool>,
    pub status: Option<&'a str>,
    pub course_overview_provider: Option<&'a str>,
    pub meta_keywords: Option<&'a str>,
    pub meta_description: Option<&'a str>,
    pub is_free_course: Option<bool>,
    pub multi_instructor: Option<bool>,
    pub enable_drip_content: Option<bool>,
    pub creator: Option<i32>,
    pub expiry_period: Option<i32>,
    pub upcoming_image_thumbnail: Option<&'a str>,
    pub publish_date: Option<&'a str>,
}

impl From<Course> for DomainCourse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            short_description: course.short_description,
            description: course.description,
            outcomes: course.outcomes,
            faqs: course.faqs,
            language: course.language,
            category_id: course.category_id,
            sub_category_id: course.sub_category_id,
            section: course.section,
            requirements: course.requirements,
            price: course.price,
            discount_flag: course.discount_flag,
            discounted_price: course.discounted_price,
            level: course.level,
            user_id: course.user_id,
            thumbnail: course.thumbnail,
            video_url: course.video_url,
            date_added: course.date_added,
            last_modified: course.last_modified,
            course_type: course.course_type,
            is_top_course: course.is_top_course,
            is_admin: course.is_admin,
            status: course.status,
            course_overview_provider: course.course_overview_provider,
            meta_keywords: course.meta_keywords,
            meta_description: course.meta_description,
            is_free_course: course.is_free_course,
            multi_instructor: course.multi_instructor,
            enable_drip_content: course.enable_drip_content,
            creator: course.creator,
            expiry_period: course.expiry_period,
            upcoming_image_thumbnail: course.upcoming_image_thumbnail,
            publish_date: course.publish_date,
        }
    }
}

impl<'a> From<&'a DomainNewCourse> for NewCourse<'a> {
    fn from(course: &'a DomainNewCourse) -> Self {
        Self {
            title: course.title.as_str(),
            short_description: course.short_description.as_deref(),
            description: course.description.as_deref(),
            outcomes: course.outcomes.as_deref(),
            faqs: course.faqs.as_deref(),
            language: course.language.as_deref(),
            category_id: course.category_id,
            sub_category_id: course.sub_category_id,
            section: course.section.as_deref(),
            requirements: course.requirements.as_deref(),
            price: course.price,
            discount_flag: course.discount_flag,
            discounted_price: course.discounted_price,
            level: course.level.as_deref(),
            user_id: course.user_id,
            thumbnail: course.thumbnail.as_deref(),
            video_url: course.video_url.as_deref(),
            course_type: course.course_type.as_deref(),
            is_top_course: course.is_top_course,
            is_admin: course.is_admin,
            status: course.status.as_deref(),
            course_overview_provider: course.course_overview_provider.as_deref(),
            meta_keywords: course.meta_keywords.as_deref(),
            meta_description: course.meta_description.as_deref(),
            is_free_course: course.is_free_course,
            multi_instructor: course.multi_instructor,
            enable_drip_content: course.enable_drip_content,
            creator: course.creator,
            expiry_period: course.expiry_period,
            upcoming_image_thumbnail: course.upcoming_image_thumbnail.as_deref(),
            publish_date: course.publish_date.as_deref(),
        }
    }
}
