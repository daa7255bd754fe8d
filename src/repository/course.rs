use diesel::prelude::*;
use serde_json::{Map, Value};

use crate::domain::course::{Course, NewCourse};
use crate::domain::types::CourseId;
use crate::models::course::{self as db, Course as DbCourse, NewCourse as DbNewCourse};
use crate::pagination::Page;
use crate::query::{
    ColumnType, FilterField, FilteredQuery, ListSpec, SqlValue, UpdatableField, UpdateSpec,
    UpdateStatement,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CourseReader, CourseWriter, DieselRepository, ListQuery, load_page, run_update,
};
use crate::schema::courses;

const COURSE_FILTERS: &[FilterField] = &[
    FilterField::equals("category_id", ColumnType::Integer),
    FilterField::equals("level", ColumnType::Text),
    FilterField::equals("status", ColumnType::Text),
    FilterField::equals("is_free_course", ColumnType::Bool),
    FilterField::equals("is_top_course", ColumnType::Bool),
    FilterField::substring("search", &["title", "short_description"]),
];

pub const COURSE_LIST: ListSpec = ListSpec {
    table: "courses",
    columns: db::COLUMNS,
    scope: None,
    filters: COURSE_FILTERS,
    order_by: "id DESC",
    default_limit: 10,
};

pub const COURSE_UPDATE: UpdateSpec = UpdateSpec {
    table: "courses",
    key_column: "id",
    fields: &[
        UpdatableField::new("title", ColumnType::Text),
        UpdatableField::new("short_description", ColumnType::Text),
        UpdatableField::new("description", ColumnType::Text),
        UpdatableField::new("outcomes", ColumnType::Text),
        UpdatableField::new("faqs", ColumnType::Text),
        UpdatableField::new("language", ColumnType::Text),
        UpdatableField::new("category_id", ColumnType::Integer),
        UpdatableField::new("sub_category_id", ColumnType::Integer),
        UpdatableField::new("section", ColumnType::Text),
        UpdatableField::new("requirements", ColumnType::Text),
        UpdatableField::new("price", ColumnType::Float),
        UpdatableField::new("discount_flag", ColumnType::Bool),
        UpdatableField::new("discounted_price", ColumnType::Float),
        UpdatableField::new("level", ColumnType::Text),
        UpdatableField::new("user_id", ColumnType::Integer),
        UpdatableField::new("thumbnail", ColumnType::Text),
        UpdatableField::new("video_url", ColumnType::Text),
        UpdatableField::new("course_type", ColumnType::Text),
        UpdatableField::new("is_top_course", ColumnType::Bool),
        UpdatableField::new("is_admin", ColumnType::Bool),
        UpdatableField::new("status", ColumnType::Text),
        UpdatableField::new("course_overview_provider", ColumnType::Text),
        UpdatableField::new("meta_keywords", ColumnType::Text),
        UpdatableField::new("meta_description", ColumnType::Text),
        UpdatableField::new("is_free_course", ColumnType::Bool),
        UpdatableField::new("multi_instructor", ColumnType::Bool),
        UpdatableField::new("enable_drip_content", ColumnType::Bool),
        UpdatableField::new("creator", ColumnType::Integer),
        UpdatableField::new("expiry_period", ColumnType::Integer),
        UpdatableField::new("upcoming_image_thumbnail", ColumnType::Text),
        UpdatableField::new("publish_date", ColumnType::Text),
    ],
    touch: Some("last_modified"),
    returning: db::COLUMNS,
};

impl CourseReader for DieselRepository {
    fn get_course_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>> {
        let mut conn = self.conn()?;
        let course = courses::table
            .find(id.get())
            .select(DbCourse::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(course.map(Into::into))
    }

    fn list_all_courses(&self) -> RepositoryResult<Vec<Course>> {
        let mut conn = self.conn()?;
        let items = courses::table
            .order(courses::id.desc())
            .select(DbCourse::as_select())
            .load(&mut conn)?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    fn list_courses(&self, query: &ListQuery) -> RepositoryResult<Page<Course>> {
        let filtered = FilteredQuery::build(&COURSE_LIST, query.params())?;
        let mut conn = self.conn()?;
        load_page::<DbCourse, Course>(&mut conn, &filtered)
    }
}

impl CourseWriter for DieselRepository {
    fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(courses::table)
            .values(DbNewCourse::from(new_course))
            .returning(DbCourse::as_returning())
            .get_result(&mut conn)?;
        Ok(created.into())
    }

    fn update_course(
        &self,
        id: CourseId,
        payload: &Map<String, Value>,
    ) -> RepositoryResult<Course> {
        let statement = UpdateStatement::build(
            &COURSE_UPDATE,
            payload,
            SqlValue::Integer(Some(i64::from(id.get()))),
        )?;
        let mut conn = self.conn()?;
        run_update::<DbCourse, Course>(&mut conn, &statement)
    }

    fn delete_course(&self, id: CourseId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(courses::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
