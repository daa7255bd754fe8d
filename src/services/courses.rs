//! Course catalogue use cases.

use serde_json::{Map, Value};

use crate::domain::course::{Course, NewCourse};
use crate::domain::types::CourseId;
use crate::forms::course::CreateCourseForm;
use crate::pagination::Page;
use crate::repository::{CourseReader, CourseWriter, ListQuery};
use crate::services::{RepositoryResultExt, ServiceError, ServiceResult, parse_id};

pub const COURSE_NOT_FOUND: &str = "Course not found";

pub fn list_all_courses<R>(repo: &R) -> ServiceResult<Vec<Course>>
where
    R: CourseReader + ?Sized,
{
    repo.list_all_courses().map_err(ServiceError::from)
}

pub fn list_courses<R>(repo: &R, query: &ListQuery) -> ServiceResult<Page<Course>>
where
    R: CourseReader + ?Sized,
{
    repo.list_courses(query).map_err(ServiceError::from)
}

/// Filtered listing pinned to one category; a caller-supplied `category_id`
/// parameter is overridden by the path value.
pub fn list_courses_in_category<R>(
    repo: &R,
    category_id: i32,
    query: ListQuery,
) -> ServiceResult<Page<Course>>
where
    R: CourseReader + ?Sized,
{
    let query = query.with("category_id", category_id.to_string());
    repo.list_courses(&query).map_err(ServiceError::from)
}

pub fn get_course<R>(repo: &R, id: i32) -> ServiceResult<Course>
where
    R: CourseReader + ?Sized,
{
    let id: CourseId = parse_id(id, COURSE_NOT_FOUND)?;
    repo.get_course_by_id(id)?
        .ok_or_else(|| ServiceError::NotFound(COURSE_NOT_FOUND.to_string()))
}

pub fn create_course<R>(repo: &R, form: CreateCourseForm) -> ServiceResult<Course>
where
    R: CourseWriter + ?Sized,
{
    let new_course = NewCourse::try_from(form)?;
    let course = repo.create_course(&new_course)?;
    log::info!("Created course {}", course.id);
    Ok(course)
}

/// Applies the allow-listed fields of `payload`; `last_modified` is bumped.
pub fn update_course<R>(repo: &R, id: i32, payload: &Map<String, Value>) -> ServiceResult<Course>
where
    R: CourseWriter + ?Sized,
{
    let id: CourseId = parse_id(id, COURSE_NOT_FOUND)?;
    repo.update_course(id, payload)
        .or_not_found(COURSE_NOT_FOUND)
}

pub fn delete_course<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: CourseWriter + ?Sized,
{
    let id: CourseId = parse_id(id, COURSE_NOT_FOUND)?;
    repo.delete_course(id).or_not_found(COURSE_NOT_FOUND)?;
    log::info!("Deleted course {id}");
    Ok(())
}
