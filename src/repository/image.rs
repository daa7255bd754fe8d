use diesel::prelude::*;

use crate::domain::image::{Image, NewImage};
use crate::domain::types::ImageId;
use crate::models::image::{self as db, Image as DbImage, NewImage as DbNewImage};
use crate::pagination::Page;
use crate::query::{ColumnType, FilterField, FilteredQuery, ListSpec};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ImageReader, ImageWriter, ListQuery, load_page};
use crate::schema::images;

pub const IMAGE_LIST: ListSpec = ListSpec {
    table: "images",
    columns: db::COLUMNS,
    scope: None,
    filters: &[FilterField::equals("folder", ColumnType::Text)],
    order_by: "uploaded_at DESC, id DESC",
    default_limit: 20,
};

impl ImageReader for DieselRepository {
    fn get_image_by_id(&self, id: ImageId) -> RepositoryResult<Option<Image>> {
        let mut conn = self.conn()?;
        let image = images::table
            .find(id.to_string())
            .select(DbImage::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(image.map(Into::into))
    }

    fn get_image_by_cloudinary_id(&self, cloudinary_id: &str) -> RepositoryResult<Option<Image>> {
        let mut conn = self.conn()?;
        let image = images::table
            .filter(images::cloudinary_id.eq(cloudinary_id))
            .select(DbImage::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(image.map(Into::into))
    }

    fn list_images(&self, query: &ListQuery) -> RepositoryResult<Page<Image>> {
        let filtered = FilteredQuery::build(&IMAGE_LIST, query.params())?;
        let mut conn = self.conn()?;
        load_page::<DbImage, Image>(&mut conn, &filtered)
    }
}

impl ImageWriter for DieselRepository {
    fn create_image(&self, new_image: &NewImage) -> RepositoryResult<Image> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(images::table)
            .values(DbNewImage::from(new_image))
            .returning(DbImage::as_returning())
            .get_result(&mut conn)?;
        Ok(created.into())
    }

    fn delete_image(&self, id: ImageId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(images::table.find(id.to_string())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
