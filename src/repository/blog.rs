use diesel::prelude::*;
use serde_json::{Map, Value};

use crate::domain::blog::{Blog, NewBlog};
use crate::domain::types::BlogId;
use crate::models::blog::{self as db, Blog as DbBlog, NewBlog as DbNewBlog};
use crate::pagination::Page;
use crate::query::{
    ColumnType, FilterField, FilteredQuery, ListSpec, SqlValue, UpdatableField, UpdateSpec,
    UpdateStatement,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BlogReader, BlogWriter, DieselRepository, ListQuery, load_page, run_update};
use crate::schema::blogs;

const BLOG_FILTERS: &[FilterField] = &[
    FilterField::equals("category_id", ColumnType::Integer),
    FilterField::equals("author_id", ColumnType::Integer),
    FilterField::equals("status", ColumnType::Text),
    FilterField::equals("visibility", ColumnType::Text),
    FilterField::equals("is_popular", ColumnType::Bool),
    FilterField::equals("show_on_homepage", ColumnType::Bool),
    FilterField::substring("search", &["title", "short_description"]),
];

pub const BLOG_LIST: ListSpec = ListSpec {
    table: "blogs",
    columns: db::COLUMNS,
    scope: None,
    filters: BLOG_FILTERS,
    order_by: "created_at DESC, id DESC",
    default_limit: 10,
};

pub const BLOG_UPDATE: UpdateSpec = UpdateSpec {
    table: "blogs",
    key_column: "id",
    fields: &[
        UpdatableField::new("title", ColumnType::Text),
        UpdatableField::new("slug", ColumnType::Text),
        UpdatableField::new("category_id", ColumnType::Integer),
        UpdatableField::new("author_id", ColumnType::Integer),
        UpdatableField::new("author_name", ColumnType::Text),
        UpdatableField::new("author_email", ColumnType::Text),
        UpdatableField::new("keywords", ColumnType::Text),
        UpdatableField::new("content", ColumnType::Text),
        UpdatableField::new("thumbnail_url", ColumnType::Text),
        UpdatableField::new("banner_url", ColumnType::Text),
        UpdatableField::new("is_popular", ColumnType::Bool),
        UpdatableField::new("status", ColumnType::Text),
        UpdatableField::new("short_description", ColumnType::Text),
        UpdatableField::new("reading_time", ColumnType::Integer),
        UpdatableField::new("image_alt_text", ColumnType::Text),
        UpdatableField::new("image_caption", ColumnType::Text),
        UpdatableField::new("publish_date", ColumnType::Text),
        UpdatableField::new("visibility", ColumnType::Text),
        UpdatableField::new("seo_title", ColumnType::Text),
        UpdatableField::new("seo_description", ColumnType::Text),
        UpdatableField::new("focus_keyword", ColumnType::Text),
        UpdatableField::new("canonical_url", ColumnType::Text),
        UpdatableField::new("meta_robots", ColumnType::Text),
        UpdatableField::new("allow_comments", ColumnType::Bool),
        UpdatableField::new("show_on_homepage", ColumnType::Bool),
        UpdatableField::new("is_sticky", ColumnType::Bool),
    ],
    touch: Some("updated_at"),
    returning: db::COLUMNS,
};

impl BlogReader for DieselRepository {
    fn get_blog_by_id(&self, id: BlogId) -> RepositoryResult<Option<Blog>> {
        let mut conn = self.conn()?;
        let blog = blogs::table
            .find(id.get())
            .select(DbBlog::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(blog.map(Into::into))
    }

    fn get_blog_by_slug(&self, slug: &str) -> RepositoryResult<Option<Blog>> {
        let mut conn = self.conn()?;
        let blog = blogs::table
            .filter(blogs::slug.eq(slug))
            .select(DbBlog::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(blog.map(Into::into))
    }

    fn list_all_blogs(&self) -> RepositoryResult<Vec<Blog>> {
        let mut conn = self.conn()?;
        let items = blogs::table
            .order((blogs::created_at.desc(), blogs::id.desc()))
            .select(DbBlog::as_select())
            .load(&mut conn)?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    fn list_blogs(&self, query: &ListQuery) -> RepositoryResult<Page<Blog>> {
        let filtered = FilteredQuery::build(&BLOG_LIST, query.params())?;
        let mut conn = self.conn()?;
        load_page::<DbBlog, Blog>(&mut conn, &filtered)
    }
}

impl BlogWriter for DieselRepository {
    fn create_blog(&self, new_blog: &NewBlog) -> RepositoryResult<Blog> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(blogs::table)
            .values(DbNewBlog::from(new_blog))
            .returning(DbBlog::as_returning())
            .get_result(&mut conn)?;
        Ok(created.into())
    }

    fn update_blog(&self, id: BlogId, payload: &Map<String, Value>) -> RepositoryResult<Blog> {
        let statement = UpdateStatement::build(
            &BLOG_UPDATE,
            payload,
            SqlValue::Integer(Some(i64::from(id.get()))),
        )?;
        let mut conn = self.conn()?;
        run_update::<DbBlog, Blog>(&mut conn, &statement)
    }

    fn delete_blog(&self, id: BlogId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(blogs::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
