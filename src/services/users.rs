//! User account and instructor directory use cases.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::media::MediaHost;
use crate::domain::types::{EmailAddress, UserId};
use crate::domain::user::{NewUser, User, UserStatus};
use crate::forms::image::ImageUpload;
use crate::forms::user::{CreateUserForm, UserStatusForm};
use crate::pagination::Page;
use crate::repository::{ListQuery, UserReader, UserWriter};
use crate::services::images::{HostedImage, IMAGE_UPLOAD_FAILED};
use crate::services::{RepositoryResultExt, ServiceError, ServiceResult, parse_id};

pub const USER_NOT_FOUND: &str = "User not found";
pub const DUPLICATE_USER: &str = "Email or phone already exists";

/// Body returned after a user is deleted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeletedUser {
    pub id: i32,
    pub deleted_at: DateTime<Utc>,
}

/// Validates the submission, hashes the password and stores the account.
pub fn create_user<R>(repo: &R, form: CreateUserForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let new_user = NewUser::try_from(form)?;
    let user = repo.create_user(&new_user).or_conflict(DUPLICATE_USER)?;
    log::info!("Created user {}", user.id);
    Ok(user)
}

pub fn list_users<R>(repo: &R, query: &ListQuery) -> ServiceResult<Page<User>>
where
    R: UserReader + ?Sized,
{
    repo.list_users(query).map_err(ServiceError::from)
}

/// Users with the instructor role or flag.
pub fn list_instructors<R>(repo: &R, query: &ListQuery) -> ServiceResult<Page<User>>
where
    R: UserReader + ?Sized,
{
    repo.list_instructors(query).map_err(ServiceError::from)
}

pub fn get_user<R>(repo: &R, id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let id: UserId = parse_id(id, USER_NOT_FOUND)?;
    repo.get_user_by_id(id)?
        .ok_or_else(|| ServiceError::NotFound(USER_NOT_FOUND.to_string()))
}

/// Looks a user up by address; malformed addresses cannot match anyone.
pub fn get_user_by_email<R>(repo: &R, email: &str) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let email = EmailAddress::new(email)
        .map_err(|_| ServiceError::NotFound(USER_NOT_FOUND.to_string()))?;
    repo.get_user_by_email(&email)?
        .ok_or_else(|| ServiceError::NotFound(USER_NOT_FOUND.to_string()))
}

pub fn update_user<R>(repo: &R, id: i32, payload: &Map<String, Value>) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let id: UserId = parse_id(id, USER_NOT_FOUND)?;
    repo.update_user(id, payload)
        .or_resource_errors(USER_NOT_FOUND, DUPLICATE_USER)
}

/// Switches the account between `ACTIVE` and `INACTIVE`.
pub fn update_user_status<R>(repo: &R, id: i32, form: UserStatusForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let status = UserStatus::try_from(form)?;
    let id: UserId = parse_id(id, USER_NOT_FOUND)?;

    let mut payload = Map::new();
    payload.insert("status".to_string(), Value::from(status.as_str()));

    let user = repo.update_user(id, &payload).or_not_found(USER_NOT_FOUND)?;
    log::info!("User {id} is now {}", status.as_str());
    Ok(user)
}

pub fn delete_user<R>(repo: &R, id: i32) -> ServiceResult<DeletedUser>
where
    R: UserWriter + ?Sized,
{
    let id: UserId = parse_id(id, USER_NOT_FOUND)?;
    repo.delete_user(id).or_not_found(USER_NOT_FOUND)?;
    log::info!("Deleted user {id}");
    Ok(DeletedUser {
        id: id.get(),
        deleted_at: Utc::now(),
    })
}

/// Uploads a profile picture for an existing user and records its URL.
pub async fn upload_profile_image<R, M>(
    repo: &R,
    media: &M,
    id: i32,
    upload: ImageUpload,
) -> ServiceResult<HostedImage>
where
    R: UserReader + UserWriter + ?Sized,
    M: MediaHost + ?Sized,
{
    let id: UserId = parse_id(id, USER_NOT_FOUND)?;
    if repo.get_user_by_id(id)?.is_none() {
        return Err(ServiceError::NotFound(USER_NOT_FOUND.to_string()));
    }

    let uploaded = media
        .upload(upload.bytes, &upload.file_name, &upload.folder)
        .await
        .map_err(|err| {
            log::error!("Profile image upload for user {id} failed: {err}");
            ServiceError::Upstream(IMAGE_UPLOAD_FAILED.to_string())
        })?;

    let mut payload = Map::new();
    payload.insert(
        "profile_image_url".to_string(),
        Value::from(uploaded.secure_url.clone()),
    );
    repo.update_user(id, &payload).or_not_found(USER_NOT_FOUND)?;

    Ok(uploaded.into())
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::clients::UpstreamError;
    use crate::clients::media::{MockMediaHost, UploadedMedia};
    use crate::forms::image::PROFILE_FOLDER;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    pub(crate) fn sample_user(id: i32) -> User {
        let now = DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .naive_utc();
        User {
            id,
            first_name: "Barbara".into(),
            last_name: "McClintock".into(),
            title: None,
            email: "barbara@example.com".into(),
            phone: "+15550000".into(),
            address: None,
            profile_image_url: None,
            biography: None,
            linkedin_url: None,
            github_url: None,
            role: "STUDENT".into(),
            is_instructor: false,
            status: "ACTIVE".into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn form() -> CreateUserForm {
        CreateUserForm {
            first_name: Some("Barbara".into()),
            last_name: Some("McClintock".into()),
            email: Some("barbara@example.com".into()),
            phone: Some("+15550000".into()),
            password: Some("maize-genetics".into()),
            ..Default::default()
        }
    }

    fn upload() -> ImageUpload {
        ImageUpload {
            bytes: vec![1, 2, 3],
            file_name: "me.png".into(),
            folder: PROFILE_FOLDER.into(),
        }
    }

    #[test]
    fn create_user_maps_duplicates_to_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_create_user()
            .times(1)
            .returning(|_| Err(RepositoryError::Duplicate("users.email".into())));

        let result = create_user(&repo, form());

        assert!(matches!(result, Err(ServiceError::Conflict(m)) if m == DUPLICATE_USER));
    }

    #[test]
    fn create_user_never_stores_plain_password() {
        let mut repo = MockRepository::new();
        repo.expect_create_user()
            .withf(|user| user.password_hash != "maize-genetics" && user.password_hash.len() == 64)
            .times(1)
            .returning(|_| Ok(sample_user(1)));

        assert_eq!(create_user(&repo, form()).unwrap().id, 1);
    }

    #[test]
    fn create_user_rejects_short_password_without_writing() {
        let mut repo = MockRepository::new();
        repo.expect_create_user().times(0);

        let result = create_user(
            &repo,
            CreateUserForm {
                password: Some("123".into()),
                ..form()
            },
        );

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn malformed_email_lookup_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email().times(0);

        assert!(matches!(
            get_user_by_email(&repo, "nobody"),
            Err(ServiceError::NotFound(m)) if m == USER_NOT_FOUND
        ));
    }

    #[test]
    fn status_update_rejects_unknown_status() {
        let mut repo = MockRepository::new();
        repo.expect_update_user().times(0);

        let result = update_user_status(
            &repo,
            1,
            UserStatusForm {
                status: Some("SUSPENDED".into()),
            },
        );

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn status_update_writes_only_status() {
        let mut repo = MockRepository::new();
        repo.expect_update_user()
            .withf(|id, payload| {
                id.get() == 4 && payload.len() == 1 && payload["status"] == "INACTIVE"
            })
            .times(1)
            .returning(|id, _| {
                Ok(User {
                    status: "INACTIVE".into(),
                    ..sample_user(id.get())
                })
            });

        let user = update_user_status(
            &repo,
            4,
            UserStatusForm {
                status: Some("INACTIVE".into()),
            },
        )
        .unwrap();

        assert_eq!(user.status, "INACTIVE");
    }

    #[test]
    fn delete_user_reports_id() {
        let mut repo = MockRepository::new();
        repo.expect_delete_user().times(1).returning(|_| Ok(()));

        assert_eq!(delete_user(&repo, 6).unwrap().id, 6);
    }

    #[actix_web::test]
    async fn profile_image_requires_existing_user() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().times(1).returning(|_| Ok(None));
        repo.expect_update_user().times(0);
        let mut media = MockMediaHost::new();
        media.expect_upload().times(0);

        let result = upload_profile_image(&repo, &media, 2, upload()).await;

        assert!(matches!(result, Err(ServiceError::NotFound(m)) if m == USER_NOT_FOUND));
    }

    #[actix_web::test]
    async fn profile_image_upload_records_secure_url() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_user(id.get()))));
        repo.expect_update_user()
            .withf(|_, payload| payload["profile_image_url"] == "https://cdn/p.png")
            .times(1)
            .returning(|id, _| Ok(sample_user(id.get())));
        let mut media = MockMediaHost::new();
        media
            .expect_upload()
            .withf(|bytes, name, folder| bytes.len() == 3 && name == "me.png" && folder == PROFILE_FOLDER)
            .times(1)
            .returning(|_, _, _| {
                Ok(UploadedMedia {
                    public_id: "biomed/profiles/p".into(),
                    url: "http://cdn/p.png".into(),
                    secure_url: "https://cdn/p.png".into(),
                    width: Some(64),
                    height: Some(64),
                    bytes: Some(3),
                    format: Some("png".into()),
                })
            });

        let image = upload_profile_image(&repo, &media, 2, upload()).await.unwrap();

        assert_eq!(image.cloudinary_id, "biomed/profiles/p");
        assert_eq!(image.url, "https://cdn/p.png");
        assert_eq!(image.size, Some(3));
    }

    #[actix_web::test]
    async fn profile_image_upstream_failure_is_reported() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_user(id.get()))));
        repo.expect_update_user().times(0);
        let mut media = MockMediaHost::new();
        media.expect_upload().times(1).returning(|_, _, _| {
            Err(UpstreamError::InvalidResponse {
                service: "Cloudinary",
                reason: "boom".into(),
            })
        });

        let result = upload_profile_image(&repo, &media, 2, upload()).await;

        assert!(matches!(result, Err(ServiceError::Upstream(m)) if m == IMAGE_UPLOAD_FAILED));
    }
}
