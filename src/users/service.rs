//! In-memory user service seeded with fixture data.

use std::sync::RwLock;

use chrono::{DateTime, TimeZone, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::mock::{delay, Latency};
use crate::resource::{Listing, PageRequest, ResourceError, ResourceService};

use super::{CreateUser, UpdateUser, User, UserFilter, UserRole, UserStatus};

/// An in-memory [`ResourceService`] over [`User`] records.
///
/// Seeded with a 25-user fixture set and simulating network latency per
/// operation, this is both the development backend for a users screen and
/// the conformance example for writing new services: filter first, count
/// the total, then slice the page; typed validation at the create
/// boundary; `NotFound` for absent ids.
///
/// Created users are prepended, so the newest account appears first on
/// page 1. Ids are 9-character lowercase alphanumerics, fabricated the
/// way the mock backend's other identifiers are.
///
/// `delete_many` is deliberately *not* overridden: a
/// [`CrudController`](crate::crud::CrudController) over this service
/// exercises its per-id fallback path.
///
/// # Example
///
/// ```rust,ignore
/// use adminkit::mock::Latency;
/// use adminkit::users::{InMemoryUserService, UserFilter};
/// use adminkit::resource::{PageRequest, ResourceService};
///
/// let service = InMemoryUserService::with_latency(Latency::none());
/// let page = service
///     .list(&UserFilter::default(), PageRequest::new(1, 10))
///     .await?;
/// assert_eq!(page.total, 25);
/// ```
#[derive(Debug)]
pub struct InMemoryUserService {
    users: RwLock<Vec<User>>,
    latency: Latency,
}

impl InMemoryUserService {
    /// Creates a service with the fixture data set and default latency.
    #[must_use]
    pub fn new() -> Self {
        Self::with_latency(Latency::default())
    }

    /// Creates a service with the fixture data set and a custom latency
    /// profile.
    #[must_use]
    pub fn with_latency(latency: Latency) -> Self {
        Self::from_users(seed_users(), latency)
    }

    /// Creates a service over a custom data set.
    #[must_use]
    pub fn from_users(users: Vec<User>, latency: Latency) -> Self {
        Self {
            users: RwLock::new(users),
            latency,
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<User>>, ResourceError> {
        self.users
            .read()
            .map_err(|_| ResourceError::transport("user store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<User>>, ResourceError> {
        self.users
            .write()
            .map_err(|_| ResourceError::transport("user store lock poisoned"))
    }
}

impl Default for InMemoryUserService {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceService for InMemoryUserService {
    type Item = User;
    type Id = String;
    type Create = CreateUser;
    type Update = UpdateUser;
    type Filter = UserFilter;

    const NAME: &'static str = "User";

    async fn list(
        &self,
        filters: &UserFilter,
        page: PageRequest,
    ) -> Result<Listing<User>, ResourceError> {
        delay(self.latency.list).await;

        let filtered: Vec<User> = {
            let users = self.read()?;
            users
                .iter()
                .filter(|user| matches_filters(user, filters))
                .cloned()
                .collect()
        };

        // Total is the filtered count, taken before the page slice.
        let total = filtered.len() as u64;
        Ok(Listing::new(page.paginate(filtered), total))
    }

    async fn get(&self, id: &String) -> Result<User, ResourceError> {
        delay(self.latency.get).await;
        let users = self.read()?;
        users
            .iter()
            .find(|user| &user.id == id)
            .cloned()
            .ok_or_else(|| ResourceError::not_found(Self::NAME, id))
    }

    async fn create(&self, data: CreateUser) -> Result<User, ResourceError> {
        delay(self.latency.create).await;
        validate_create(&data)?;

        let user = User {
            id: generate_id(),
            name: data.name.trim().to_string(),
            email: data.email.trim().to_lowercase(),
            role: data.role,
            status: data.status,
            avatar: data.avatar,
            last_login: None,
            created_at: Utc::now(),
        };

        let mut users = self.write()?;
        users.insert(0, user.clone());
        Ok(user)
    }

    async fn update(&self, id: &String, data: UpdateUser) -> Result<User, ResourceError> {
        delay(self.latency.update).await;
        let mut users = self.write()?;
        let user = users
            .iter_mut()
            .find(|user| &user.id == id)
            .ok_or_else(|| ResourceError::not_found(Self::NAME, id))?;

        if let Some(name) = data.name {
            user.name = name;
        }
        if let Some(email) = data.email {
            user.email = email.trim().to_lowercase();
        }
        if let Some(role) = data.role {
            user.role = role;
        }
        if let Some(status) = data.status {
            user.status = status;
        }
        if let Some(avatar) = data.avatar {
            user.avatar = Some(avatar);
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: &String) -> Result<(), ResourceError> {
        delay(self.latency.delete).await;
        let mut users = self.write()?;
        let position = users
            .iter()
            .position(|user| &user.id == id)
            .ok_or_else(|| ResourceError::not_found(Self::NAME, id))?;
        users.remove(position);
        Ok(())
    }
}

fn matches_filters(user: &User, filters: &UserFilter) -> bool {
    if let Some(query) = filters.search.as_deref() {
        if !query.is_empty() {
            let query = query.to_lowercase();
            if !user.name.to_lowercase().contains(&query)
                && !user.email.to_lowercase().contains(&query)
            {
                return false;
            }
        }
    }
    if let Some(role) = filters.role {
        if user.role != role {
            return false;
        }
    }
    if let Some(status) = filters.status {
        if user.status != status {
            return false;
        }
    }
    true
}

fn validate_create(data: &CreateUser) -> Result<(), ResourceError> {
    let mut errors = std::collections::HashMap::new();
    if data.name.trim().is_empty() {
        errors.insert(
            "name".to_string(),
            vec!["cannot be empty".to_string()],
        );
    }
    let email = data.email.trim();
    if email.is_empty() || !email.contains('@') {
        errors.insert(
            "email".to_string(),
            vec!["must be a valid email address".to_string()],
        );
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ResourceError::Validation { errors })
    }
}

/// Fabricates a 9-character lowercase alphanumeric id.
fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn avatar(n: u32) -> Option<String> {
    Some(format!("https://i.pravatar.cc/150?u={n}"))
}

#[allow(clippy::too_many_lines)]
fn seed_users() -> Vec<User> {
    use UserRole::{Admin, Editor, Viewer};
    use UserStatus::{Active, Inactive, Pending};

    let rows: [(
        &str,
        &str,
        &str,
        UserRole,
        UserStatus,
        Option<DateTime<Utc>>,
        DateTime<Utc>,
    ); 25] = [
        ("1", "Sarah Smith", "sarah.smith@example.com", Admin, Active, Some(ts(2024, 3, 10, 8, 30)), ts(2024, 1, 1, 10, 0)),
        ("2", "Michael Chen", "michael.chen@example.com", Editor, Active, Some(ts(2024, 3, 9, 14, 20)), ts(2024, 1, 5, 9, 15)),
        ("3", "Emma Wilson", "emma.wilson@example.com", Viewer, Inactive, Some(ts(2024, 2, 28, 11, 45)), ts(2024, 1, 10, 16, 20)),
        ("4", "James Rodriguez", "james.r@example.com", Editor, Pending, None, ts(2024, 3, 1, 8, 0)),
        ("5", "Lisa Wong", "lisa.w@example.com", Admin, Active, Some(ts(2024, 3, 10, 9, 0)), ts(2024, 1, 15, 10, 30)),
        ("6", "David Miller", "david.m@example.com", Viewer, Active, Some(ts(2024, 3, 11, 10, 0)), ts(2024, 2, 1, 11, 0)),
        ("7", "Jennifer Taylor", "jennifer.t@example.com", Editor, Active, Some(ts(2024, 3, 12, 9, 30)), ts(2024, 2, 5, 14, 0)),
        ("8", "Robert Anderson", "robert.a@example.com", Viewer, Inactive, Some(ts(2024, 2, 20, 16, 0)), ts(2024, 2, 10, 9, 0)),
        ("9", "Patricia Thomas", "patricia.t@example.com", Admin, Active, Some(ts(2024, 3, 12, 11, 0)), ts(2024, 2, 15, 10, 0)),
        ("10", "John Martinez", "john.m@example.com", Editor, Pending, None, ts(2024, 2, 20, 13, 0)),
        ("11", "Elizabeth Hernandez", "elizabeth.h@example.com", Viewer, Active, Some(ts(2024, 3, 11, 14, 0)), ts(2024, 2, 25, 11, 0)),
        ("12", "William Clark", "william.c@example.com", Editor, Active, Some(ts(2024, 3, 10, 15, 0)), ts(2024, 3, 1, 9, 0)),
        ("13", "Linda Lewis", "linda.l@example.com", Admin, Inactive, Some(ts(2024, 2, 25, 10, 0)), ts(2024, 3, 2, 10, 0)),
        ("14", "Richard Lee", "richard.l@example.com", Viewer, Pending, None, ts(2024, 3, 3, 11, 0)),
        ("15", "Barbara Walker", "barbara.w@example.com", Editor, Active, Some(ts(2024, 3, 12, 12, 0)), ts(2024, 3, 4, 12, 0)),
        ("16", "Joseph Hall", "joseph.h@example.com", Viewer, Active, Some(ts(2024, 3, 11, 16, 0)), ts(2024, 3, 5, 13, 0)),
        ("17", "Susan Allen", "susan.a@example.com", Admin, Active, Some(ts(2024, 3, 12, 13, 0)), ts(2024, 3, 6, 14, 0)),
        ("18", "Thomas Young", "thomas.y@example.com", Editor, Inactive, Some(ts(2024, 2, 28, 14, 0)), ts(2024, 3, 7, 15, 0)),
        ("19", "Margaret King", "margaret.k@example.com", Viewer, Pending, None, ts(2024, 3, 8, 9, 0)),
        ("20", "Charles Wright", "charles.w@example.com", Admin, Active, Some(ts(2024, 3, 12, 15, 0)), ts(2024, 3, 9, 10, 0)),
        ("21", "Jessica Scott", "jessica.s@example.com", Editor, Active, Some(ts(2024, 3, 11, 9, 0)), ts(2024, 3, 10, 11, 0)),
        ("22", "Christopher Green", "christopher.g@example.com", Viewer, Active, Some(ts(2024, 3, 10, 12, 0)), ts(2024, 3, 11, 12, 0)),
        ("23", "Karen Adams", "karen.a@example.com", Admin, Inactive, Some(ts(2024, 2, 15, 10, 0)), ts(2024, 3, 12, 13, 0)),
        ("24", "Daniel Baker", "daniel.b@example.com", Editor, Pending, None, ts(2024, 3, 12, 14, 0)),
        ("25", "Nancy Gonzalez", "nancy.g@example.com", Viewer, Active, Some(ts(2024, 3, 12, 16, 0)), ts(2024, 3, 12, 15, 0)),
    ];

    rows.into_iter()
        .enumerate()
        .map(
            |(index, (id, name, email, role, status, last_login, created_at))| User {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                role,
                status,
                avatar: avatar(index as u32 + 1),
                last_login,
                created_at,
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> InMemoryUserService {
        InMemoryUserService::with_latency(Latency::none())
    }

    #[test]
    fn test_seed_has_25_users_with_unique_ids() {
        let users = seed_users();
        assert_eq!(users.len(), 25);

        let mut ids: Vec<&str> = users.iter().map(|user| user.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 25);
    }

    #[test]
    fn test_generate_id_shape() {
        for _ in 0..20 {
            let id = generate_id();
            assert_eq!(id.len(), 9);
            assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_validate_create_collects_all_field_errors() {
        let invalid = CreateUser {
            name: "  ".to_string(),
            email: "not-an-email".to_string(),
            role: UserRole::Viewer,
            status: UserStatus::Pending,
            avatar: None,
        };
        let Err(ResourceError::Validation { errors }) = validate_create(&invalid) else {
            panic!("expected validation failure");
        };
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("email"));
    }

    #[tokio::test]
    async fn test_search_matches_name_and_email_case_insensitively() {
        let service = service();

        let by_name = service
            .list(
                &UserFilter {
                    search: Some("SMITH".to_string()),
                    ..UserFilter::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(by_name.total, 1);
        assert_eq!(by_name.data[0].name, "Sarah Smith");

        let by_email = service
            .list(
                &UserFilter {
                    search: Some("james.r@".to_string()),
                    ..UserFilter::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(by_email.total, 1);
    }

    #[tokio::test]
    async fn test_categorical_filters_are_exact_and_combine() {
        let service = service();
        let listing = service
            .list(
                &UserFilter {
                    search: None,
                    role: Some(UserRole::Admin),
                    status: Some(UserStatus::Active),
                },
                PageRequest::new(1, 50),
            )
            .await
            .unwrap();

        assert_eq!(listing.total, 5);
        assert!(listing
            .data
            .iter()
            .all(|user| user.role == UserRole::Admin && user.status == UserStatus::Active));
    }

    #[tokio::test]
    async fn test_create_prepends_and_stamps_metadata() {
        let service = service();
        let created = service
            .create(CreateUser {
                name: "New Person".to_string(),
                email: "New.Person@Example.com".to_string(),
                role: UserRole::Editor,
                status: UserStatus::Pending,
                avatar: None,
            })
            .await
            .unwrap();

        assert_eq!(created.email, "new.person@example.com");
        assert_eq!(created.id.len(), 9);
        assert!(created.last_login.is_none());

        let first_page = service
            .list(&UserFilter::default(), PageRequest::new(1, 10))
            .await
            .unwrap();
        assert_eq!(first_page.data[0].id, created.id);
        assert_eq!(first_page.total, 26);
    }

    #[tokio::test]
    async fn test_update_merges_only_present_fields() {
        let service = service();
        let updated = service
            .update(
                &"3".to_string(),
                UpdateUser {
                    status: Some(UserStatus::Active),
                    ..UpdateUser::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, UserStatus::Active);
        assert_eq!(updated.name, "Emma Wilson");
        assert_eq!(updated.role, UserRole::Viewer);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let service = service();
        let id = "zzzzzzzzz".to_string();

        assert!(service.get(&id).await.unwrap_err().is_not_found());
        assert!(service
            .update(&id, UpdateUser::default())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(service.delete(&id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let service = service();
        service.delete(&"7".to_string()).await.unwrap();

        let listing = service
            .list(&UserFilter::default(), PageRequest::new(1, 50))
            .await
            .unwrap();
        assert_eq!(listing.total, 24);
        assert!(listing.data.iter().all(|user| user.id != "7"));
    }
}
