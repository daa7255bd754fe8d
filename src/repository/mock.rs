//! Mock repository implementations for isolating services in tests.

use mockall::mock;
use serde_json::{Map, Value};

use crate::domain::blog::{Blog, NewBlog};
use crate::domain::contact_message::{ContactMessage, ContactStats, NewContactMessage};
use crate::domain::course::{Course, NewCourse};
use crate::domain::image::{Image, NewImage};
use crate::domain::subscriber::{Subscriber, SubscriberStats};
use crate::domain::types::{BlogId, ContactMessageId, CourseId, EmailAddress, ImageId, UserId};
use crate::domain::user::{NewUser, User};
use crate::pagination::Page;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BlogReader, BlogWriter, ContactReader, ContactWriter, CourseReader, CourseWriter, HealthCheck,
    ImageReader, ImageWriter, ListQuery, SubscriberReader, SubscriberWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl HealthCheck for Repository {
        fn ping(&self) -> RepositoryResult<()>;
    }

    impl BlogReader for Repository {
        fn get_blog_by_id(&self, id: BlogId) -> RepositoryResult<Option<Blog>>;
        fn get_blog_by_slug(&self, slug: &str) -> RepositoryResult<Option<Blog>>;
        fn list_all_blogs(&self) -> RepositoryResult<Vec<Blog>>;
        fn list_blogs(&self, query: &ListQuery) -> RepositoryResult<Page<Blog>>;
    }

    impl BlogWriter for Repository {
        fn create_blog(&self, new_blog: &NewBlog) -> RepositoryResult<Blog>;
        fn update_blog(&self, id: BlogId, payload: &Map<String, Value>) -> RepositoryResult<Blog>;
        fn delete_blog(&self, id: BlogId) -> RepositoryResult<()>;
    }

    impl CourseReader for Repository {
        fn get_course_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>>;
        fn list_all_courses(&self) -> RepositoryResult<Vec<Course>>;
        fn list_courses(&self, query: &ListQuery) -> RepositoryResult<Page<Course>>;
    }

    impl CourseWriter for Repository {
        fn create_course(&self, new_course: &NewCourse) -> RepositoryResult<Course>;
        fn update_course(
            &self,
            id: CourseId,
            payload: &Map<String, Value>,
        ) -> RepositoryResult<Course>;
        fn delete_course(&self, id: CourseId) -> RepositoryResult<()>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &EmailAddress) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: &ListQuery) -> RepositoryResult<Page<User>>;
        fn list_instructors(&self, query: &ListQuery) -> RepositoryResult<Page<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, id: UserId, payload: &Map<String, Value>) -> RepositoryResult<User>;
        fn delete_user(&self, id: UserId) -> RepositoryResult<()>;
    }

    impl ContactReader for Repository {
        fn get_contact_message_by_id(
            &self,
            id: ContactMessageId,
        ) -> RepositoryResult<Option<ContactMessage>>;
        fn list_contact_messages(
            &self,
            query: &ListQuery,
        ) -> RepositoryResult<Page<ContactMessage>>;
        fn contact_stats(&self) -> RepositoryResult<ContactStats>;
    }

    impl ContactWriter for Repository {
        fn create_contact_message(
            &self,
            message: &NewContactMessage,
        ) -> RepositoryResult<ContactMessage>;
        fn update_contact_message(
            &self,
            id: ContactMessageId,
            payload: &Map<String, Value>,
        ) -> RepositoryResult<ContactMessage>;
        fn delete_contact_message(
            &self,
            id: ContactMessageId,
        ) -> RepositoryResult<ContactMessage>;
    }

    impl SubscriberReader for Repository {
        fn get_subscriber_by_email(
            &self,
            email: &EmailAddress,
        ) -> RepositoryResult<Option<Subscriber>>;
        fn list_subscribers(&self, query: &ListQuery) -> RepositoryResult<Page<Subscriber>>;
        fn subscriber_stats(&self) -> RepositoryResult<SubscriberStats>;
    }

    impl SubscriberWriter for Repository {
        fn create_subscriber(&self, email: &EmailAddress) -> RepositoryResult<Subscriber>;
        fn unsubscribe(&self, email: &EmailAddress) -> RepositoryResult<Option<Subscriber>>;
    }

    impl ImageReader for Repository {
        fn get_image_by_id(&self, id: ImageId) -> RepositoryResult<Option<Image>>;
        fn get_image_by_cloudinary_id(
            &self,
            cloudinary_id: &str,
        ) -> RepositoryResult<Option<Image>>;
        fn list_images(&self, query: &ListQuery) -> RepositoryResult<Page<Image>>;
    }

    impl ImageWriter for Repository {
        fn create_image(&self, new_image: &NewImage) -> RepositoryResult<Image>;
        fn delete_image(&self, id: ImageId) -> RepositoryResult<()>;
    }
}
