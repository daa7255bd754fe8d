//! Blog post use cases.

use serde_json::{Map, Value};

use crate::domain::blog::{Blog, NewBlog};
use crate::domain::types::BlogId;
use crate::forms::blog::CreateBlogForm;
use crate::pagination::Page;
use crate::repository::{BlogReader, BlogWriter, ListQuery};
use crate::services::{RepositoryResultExt, ServiceError, ServiceResult, parse_id};

pub const BLOG_NOT_FOUND: &str = "Blog not found";
pub const DUPLICATE_SLUG: &str = "A blog with this slug already exists";

/// Every blog, newest first.
pub fn list_all_blogs<R>(repo: &R) -> ServiceResult<Vec<Blog>>
where
    R: BlogReader + ?Sized,
{
    repo.list_all_blogs().map_err(ServiceError::from)
}

/// One page of blogs matching the allow-listed query parameters.
pub fn list_blogs<R>(repo: &R, query: &ListQuery) -> ServiceResult<Page<Blog>>
where
    R: BlogReader + ?Sized,
{
    repo.list_blogs(query).map_err(ServiceError::from)
}

pub fn get_blog<R>(repo: &R, id: i32) -> ServiceResult<Blog>
where
    R: BlogReader + ?Sized,
{
    let id: BlogId = parse_id(id, BLOG_NOT_FOUND)?;
    repo.get_blog_by_id(id)?
        .ok_or_else(|| ServiceError::NotFound(BLOG_NOT_FOUND.to_string()))
}

pub fn get_blog_by_slug<R>(repo: &R, slug: &str) -> ServiceResult<Blog>
where
    R: BlogReader + ?Sized,
{
    repo.get_blog_by_slug(slug)?
        .ok_or_else(|| ServiceError::NotFound(BLOG_NOT_FOUND.to_string()))
}

/// Validates the submission and stores it, rejecting duplicate slugs.
pub fn create_blog<R>(repo: &R, form: CreateBlogForm) -> ServiceResult<Blog>
where
    R: BlogWriter + ?Sized,
{
    let new_blog = NewBlog::try_from(form)?;
    let blog = repo.create_blog(&new_blog).or_conflict(DUPLICATE_SLUG)?;
    log::info!("Created blog {} ({})", blog.id, blog.slug);
    Ok(blog)
}

/// Applies the allow-listed fields of `payload` to the blog.
pub fn update_blog<R>(repo: &R, id: i32, payload: &Map<String, Value>) -> ServiceResult<Blog>
where
    R: BlogWriter + ?Sized,
{
    let id: BlogId = parse_id(id, BLOG_NOT_FOUND)?;
    repo.update_blog(id, payload)
        .or_resource_errors(BLOG_NOT_FOUND, DUPLICATE_SLUG)
}

pub fn delete_blog<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: BlogWriter + ?Sized,
{
    let id: BlogId = parse_id(id, BLOG_NOT_FOUND)?;
    repo.delete_blog(id).or_not_found(BLOG_NOT_FOUND)?;
    log::info!("Deleted blog {id}");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::DateTime;
    use serde_json::json;

    use super::*;
    use crate::pagination::PageRequest;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    pub(crate) fn sample_blog(id: i32, slug: &str) -> Blog {
        let now = DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .naive_utc();
        Blog {
            id,
            title: "CRISPR basics".into(),
            slug: slug.into(),
            category_id: 1,
            author_id: 2,
            author_name: None,
            author_email: None,
            keywords: None,
            content: "<p>Body</p>".into(),
            thumbnail_url: None,
            banner_url: None,
            is_popular: false,
            status: "draft".into(),
            short_description: None,
            reading_time: None,
            image_alt_text: None,
            image_caption: None,
            publish_date: None,
            visibility: "private".into(),
            seo_title: None,
            seo_description: None,
            focus_keyword: None,
            canonical_url: None,
            meta_robots: None,
            allow_comments: true,
            show_on_homepage: false,
            is_sticky: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn form() -> CreateBlogForm {
        CreateBlogForm {
            title: Some("CRISPR basics".into()),
            slug: Some("crispr-basics".into()),
            category_id: Some(1),
            author_id: Some(2),
            content: Some("<p>Body</p>".into()),
            ..Default::default()
        }
    }

    #[test]
    fn get_blog_reports_missing_blog() {
        let mut repo = MockRepository::new();
        repo.expect_get_blog_by_id()
            .withf(|id| id.get() == 9)
            .times(1)
            .returning(|_| Ok(None));

        let result = get_blog(&repo, 9);

        assert!(matches!(result, Err(ServiceError::NotFound(m)) if m == BLOG_NOT_FOUND));
    }

    #[test]
    fn non_positive_id_never_reaches_repository() {
        let mut repo = MockRepository::new();
        repo.expect_get_blog_by_id().times(0);
        repo.expect_delete_blog().times(0);

        assert!(matches!(get_blog(&repo, 0), Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_blog(&repo, -4), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn get_blog_by_slug_returns_blog() {
        let mut repo = MockRepository::new();
        repo.expect_get_blog_by_slug()
            .withf(|slug| slug == "crispr-basics")
            .times(1)
            .returning(|slug| Ok(Some(sample_blog(1, slug))));

        let blog = get_blog_by_slug(&repo, "crispr-basics").unwrap();

        assert_eq!(blog.id, 1);
    }

    #[test]
    fn create_blog_validates_before_writing() {
        let mut repo = MockRepository::new();
        repo.expect_create_blog().times(0);

        let result = create_blog(
            &repo,
            CreateBlogForm {
                slug: None,
                ..form()
            },
        );

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_blog_maps_duplicate_slug_to_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_create_blog()
            .times(1)
            .returning(|_| Err(RepositoryError::Duplicate("blogs.slug".into())));

        let result = create_blog(&repo, form());

        assert!(matches!(result, Err(ServiceError::Conflict(m)) if m == DUPLICATE_SLUG));
    }

    #[test]
    fn create_blog_persists_submission() {
        let mut repo = MockRepository::new();
        repo.expect_create_blog()
            .withf(|blog| blog.slug.as_str() == "crispr-basics" && blog.author_id == 2)
            .times(1)
            .returning(|blog| Ok(sample_blog(5, blog.slug.as_str())));

        let blog = create_blog(&repo, form()).unwrap();

        assert_eq!(blog.id, 5);
    }

    #[test]
    fn update_blog_passes_validation_errors_through() {
        let mut repo = MockRepository::new();
        repo.expect_update_blog()
            .times(1)
            .returning(|_, _| Err(RepositoryError::ValidationError("No valid fields to update".into())));

        let payload = json!({"unknown": 1}).as_object().unwrap().clone();
        let result = update_blog(&repo, 1, &payload);

        assert!(
            matches!(result, Err(ServiceError::Validation(m)) if m == "No valid fields to update")
        );
    }

    #[test]
    fn update_blog_reports_missing_blog() {
        let mut repo = MockRepository::new();
        repo.expect_update_blog()
            .times(1)
            .returning(|_, _| Err(RepositoryError::NotFound));

        let payload = json!({"title": "New"}).as_object().unwrap().clone();
        let result = update_blog(&repo, 3, &payload);

        assert!(matches!(result, Err(ServiceError::NotFound(m)) if m == BLOG_NOT_FOUND));
    }

    #[test]
    fn list_blogs_forwards_query() {
        let mut repo = MockRepository::new();
        repo.expect_list_blogs()
            .withf(|query| query.params().get("status").map(String::as_str) == Some("published"))
            .times(1)
            .returning(|_| {
                Ok(Page::new(
                    vec![sample_blog(1, "a")],
                    PageRequest::new(1, 10),
                    1,
                ))
            });

        let page = list_blogs(&repo, &ListQuery::default().with("status", "published")).unwrap();

        assert_eq!(page.meta.total, 1);
        assert_eq!(page.items.len(), 1);
    }
}
