//! Role names used by the admin API's access control.

/// Full administrative access, including destructive operations.
pub const ROLE_ADMIN: &str = "admin";

/// May create and edit content but not delete pages.
pub const ROLE_EDITOR: &str = "editor";
