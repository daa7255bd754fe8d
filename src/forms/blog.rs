use serde::Deserialize;

use crate::domain::blog::NewBlog;
use crate::forms::{FormError, lenient_bool, lenient_i32, optional, present};

pub const BLOG_REQUIRED: &str = "Title, content, category_id, author_id, and slug are required";

/// JSON body of `POST /blogs/create`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateBlogForm {
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(deserialize_with = "lenient_i32")]
    pub category_id: Option<i32>,
    #[serde(deserialize_with = "lenient_i32")]
    pub author_id: Option<i32>,
    pub content: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub keywords: Option<String>,
    pub thumbnail_url: Option<String>,
    pub banner_url: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_popular: Option<bool>,
    pub status: Option<String>,
    pub short_description: Option<String>,
    #[serde(deserialize_with = "lenient_i32")]
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
    #[serde(deserialize_with = "lenient_bool")]
    pub allow_comments: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub show_on_homepage: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_sticky: Option<bool>,
}

impl TryFrom<CreateBlogForm> for NewBlog {
    type Error = FormError;

    fn try_from(form: CreateBlogForm) -> Result<Self, Self::Error> {
        let (Some(title), Some(slug), Some(category_id), Some(author_id), Some(content)) = (
            present(form.title),
            present(form.slug),
            form.category_id,
            form.author_id,
            present(form.content),
        ) else {
            return Err(FormError::MissingFields(BLOG_REQUIRED));
        };

        Ok(NewBlog {
            author_name: optional(form.author_name),
            author_email: optional(form.author_email),
            keywords: optional(form.keywords),
            thumbnail_url: optional(form.thumbnail_url),
            banner_url: optional(form.banner_url),
            is_popular: form.is_popular,
            status: optional(form.status),
            short_description: optional(form.short_description),
            reading_time: form.reading_time,
            image_alt_text: optional(form.image_alt_text),
            image_caption: optional(form.image_caption),
            publish_date: optional(form.publish_date),
            visibility: optional(form.visibility),
            seo_title: optional(form.seo_title),
            seo_description: optional(form.seo_description),
            focus_keyword: optional(form.focus_keyword),
            canonical_url: optional(form.canonical_url),
            meta_robots: optional(form.meta_robots),
            allow_comments: form.allow_comments,
            show_on_homepage: form.show_on_homepage,
            is_sticky: form.is_sticky,
            ..NewBlog::new(title, slug, category_id, author_id, content)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_form_converts() {
        let form: CreateBlogForm = serde_json::from_str(
            r#"{"title":" Gene therapy ","slug":"gene-therapy","category_id":"2",
                "author_id":5,"content":"<p>Body</p>","is_popular":"true","status":"published"}"#,
        )
        .unwrap();

        let blog = NewBlog::try_from(form).unwrap();

        assert_eq!(blog.title.as_str(), "Gene therapy");
        assert_eq!(blog.category_id, 2);
        assert_eq!(blog.author_id, 5);
        assert_eq!(blog.is_popular, Some(true));
        assert_eq!(blog.status.as_deref(), Some("published"));
        assert_eq!(blog.visibility, None);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let form: CreateBlogForm =
            serde_json::from_str(r#"{"title":"T","slug":"t","category_id":1,"content":"c"}"#)
                .unwrap();

        let err = NewBlog::try_from(form).unwrap_err();

        assert_eq!(err.to_string(), BLOG_REQUIRED);
    }

    #[test]
    fn blank_title_counts_as_missing() {
        let form = CreateBlogForm {
            title: Some("  ".into()),
            slug: Some("s".into()),
            category_id: Some(1),
            author_id: Some(1),
            content: Some("c".into()),
            ..Default::default()
        };

        assert!(matches!(
            NewBlog::try_from(form),
            Err(FormError::MissingFields(_))
        ));
    }
}
