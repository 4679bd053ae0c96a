//! Controller behind the users list-and-form screen.
//!
//! A native view binds its text inputs to `form`, renders `snapshot`, and
//! shows the `Notice` each action returns. Failures never touch the snapshot.

use tracing::{info, warn};

use crate::error::ApiError;
use crate::form::{FormSession, Submission};
use crate::remote::RemoteCollection;
use crate::snapshot::LocalSnapshot;
use crate::transport::{Transport, UreqTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A user-visible alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub message: &'static str,
}

impl Notice {
    const fn success(message: &'static str) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Success",
            message,
        }
    }

    const fn error(message: &'static str) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error",
            message,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

pub const USER_ADDED: Notice = Notice::success("User added successfully.");
pub const USER_UPDATED: Notice = Notice::success("User updated successfully.");
pub const USER_DELETED: Notice = Notice::success("User deleted successfully.");
pub const FIELDS_REQUIRED: Notice = Notice::error("Please fill in all fields.");
pub const ADD_FAILED: Notice = Notice::error("Could not add the user.");
pub const UPDATE_FAILED: Notice = Notice::error("Could not update the user.");
pub const DELETE_FAILED: Notice = Notice::error("Could not delete the user.");

#[derive(Debug)]
pub struct UserScreen<T = UreqTransport> {
    remote: RemoteCollection<T>,
    snapshot: LocalSnapshot,
    form: FormSession,
}

impl<T: Transport> UserScreen<T> {
    pub fn new(remote: RemoteCollection<T>) -> Self {
        Self {
            remote,
            snapshot: LocalSnapshot::new(),
            form: FormSession::new(),
        }
    }

    /// Rebuild the snapshot from the remote. An unreachable remote shows as
    /// an empty list.
    pub fn load(&mut self) {
        self.snapshot.replace_all(self.remote.list());
    }

    pub fn snapshot(&self) -> &LocalSnapshot {
        &self.snapshot
    }

    pub fn form(&self) -> &FormSession {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormSession {
        &mut self.form
    }

    /// Load the user at `id` into the form for editing. Returns `false` when
    /// the snapshot has no such user.
    pub fn select(&mut self, id: u64) -> bool {
        match self.snapshot.get(id) {
            Some(user) => {
                self.form.select(user);
                true
            }
            None => false,
        }
    }

    /// Create or update depending on the form mode. The form is cleared only
    /// when the remote accepted the change.
    pub fn submit(&mut self) -> Notice {
        let submission = match self.form.submission() {
            Ok(submission) => submission,
            Err(_) => return FIELDS_REQUIRED,
        };

        let (result, success, failure) = match &submission {
            Submission::Create(input) => (
                self.remote.create(&input.name, &input.email),
                USER_ADDED,
                ADD_FAILED,
            ),
            Submission::Update { id, input } => (
                self.remote.update(*id, &input.name, &input.email),
                USER_UPDATED,
                UPDATE_FAILED,
            ),
        };

        match result {
            Ok(user) => {
                info!(id = user.id, "user saved");
                self.snapshot.upsert(user);
                self.form.reset();
                success
            }
            Err(error) => {
                report(&error, "saving user failed");
                failure
            }
        }
    }

    pub fn delete(&mut self, id: u64) -> Notice {
        match self.remote.delete(id) {
            Ok(()) => {
                self.snapshot.remove(id);
                if self.form.selected == Some(id) {
                    self.form.reset();
                }
                USER_DELETED
            }
            Err(error) => {
                report(&error, "deleting user failed");
                DELETE_FAILED
            }
        }
    }
}

fn report(error: &ApiError, message: &str) {
    warn!(%error, status = error.status(), "{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::UsersClient;
    use crate::testing::{FailingTransport, InMemoryRemote};
    use crate::types::User;

    fn ana() -> User {
        User {
            id: 1,
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    fn screen(backend: &InMemoryRemote) -> UserScreen<&InMemoryRemote> {
        let remote = RemoteCollection::new(UsersClient::new(InMemoryRemote::BASE_URL), backend);
        let mut screen = UserScreen::new(remote);
        screen.load();
        screen
    }

    #[test]
    fn load_fills_snapshot() {
        let backend = InMemoryRemote::with_users(vec![ana()]);
        let screen = screen(&backend);
        assert_eq!(screen.snapshot().users(), &[ana()]);
    }

    #[test]
    fn load_against_failing_remote_is_empty() {
        let remote = RemoteCollection::new(UsersClient::new("http://down"), FailingTransport);
        let mut screen = UserScreen::new(remote);
        screen.load();
        assert!(screen.snapshot().is_empty());
    }

    #[test]
    fn submit_without_selection_adds_user() {
        let backend = InMemoryRemote::new();
        let mut screen = screen(&backend);
        screen.form_mut().set_name("Bo");
        screen.form_mut().set_email("b@x.com");

        assert_eq!(screen.submit(), USER_ADDED);
        assert_eq!(screen.snapshot().len(), 1);
        assert_eq!(screen.snapshot().users()[0].name, "Bo");
        assert_eq!(screen.form(), &FormSession::new());
        assert_eq!(backend.users(), screen.snapshot().users());
    }

    #[test]
    fn submit_with_selection_updates_in_place() {
        let backend = InMemoryRemote::with_users(vec![ana()]);
        let mut screen = screen(&backend);

        assert!(screen.select(1));
        screen.form_mut().set_name("Ana B");
        screen.form_mut().set_email("ab@x.com");

        assert_eq!(screen.submit(), USER_UPDATED);
        let updated = screen.snapshot().get(1).unwrap();
        assert_eq!(updated.name, "Ana B");
        assert_eq!(updated.email, "ab@x.com");
        assert_eq!(screen.snapshot().len(), 1);
    }

    #[test]
    fn submit_with_empty_field_sends_nothing() {
        let backend = InMemoryRemote::new();
        let mut screen = screen(&backend);
        let requests_after_load = backend.request_count();

        screen.form_mut().set_name("Bo");
        assert_eq!(screen.submit(), FIELDS_REQUIRED);
        assert_eq!(backend.request_count(), requests_after_load);
        assert_eq!(screen.form().name, "Bo");
    }

    #[test]
    fn failed_update_keeps_snapshot_and_form() {
        let backend = InMemoryRemote::with_users(vec![ana()]);
        let mut screen = screen(&backend);
        screen.select(1);
        screen.form_mut().set_name("Ana B");

        // The user vanished remotely after the snapshot was taken.
        backend_delete(&backend, 1);

        let notice = screen.submit();
        assert_eq!(notice, UPDATE_FAILED);
        assert!(!notice.is_success());
        assert_eq!(screen.snapshot().users(), &[ana()]);
        assert_eq!(screen.form().name, "Ana B");
        assert_eq!(screen.form().selected, Some(1));
    }

    #[test]
    fn failed_create_keeps_snapshot_and_form() {
        let backend = InMemoryRemote::with_users(vec![ana()]);
        let mut screen = screen(&backend);
        screen.form_mut().set_name("Bo");
        screen.form_mut().set_email("b@x.com");
        backend.fail_writes_with(503);

        let notice = screen.submit();
        assert_eq!(notice, ADD_FAILED);
        assert!(!notice.is_success());
        assert_eq!(screen.snapshot().users(), &[ana()]);
        assert_eq!(screen.form().name, "Bo");
        assert_eq!(screen.form().email, "b@x.com");
        assert_eq!(screen.form().selected, None);
        assert_eq!(backend.users(), vec![ana()]);
    }

    #[test]
    fn delete_missing_id_leaves_snapshot_unchanged() {
        let backend = InMemoryRemote::with_users(vec![ana()]);
        let mut screen = screen(&backend);

        assert_eq!(screen.delete(999), DELETE_FAILED);
        assert_eq!(screen.snapshot().users(), &[ana()]);
    }

    #[test]
    fn delete_removes_and_clears_selection() {
        let backend = InMemoryRemote::with_users(vec![ana()]);
        let mut screen = screen(&backend);
        screen.select(1);

        assert_eq!(screen.delete(1), USER_DELETED);
        assert!(screen.snapshot().is_empty());
        assert_eq!(screen.form(), &FormSession::new());
    }

    #[test]
    fn select_unknown_id_is_ignored() {
        let backend = InMemoryRemote::new();
        let mut screen = screen(&backend);
        assert!(!screen.select(42));
        assert_eq!(screen.form(), &FormSession::new());
    }

    fn backend_delete(backend: &InMemoryRemote, id: u64) {
        let remote = RemoteCollection::new(UsersClient::new(InMemoryRemote::BASE_URL), backend);
        remote.delete(id).unwrap();
    }
}
