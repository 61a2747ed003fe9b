//! Resources of the GitLab REST API v4.
//!
//! Every resource is a pair: an object type wrapping [`RestObject`] and a
//! manager type wrapping [`RestManager`]. The mixin traits each type
//! implements decide which calls it supports.
//!
//! | Resource | Path | Manager mixins |
//! |----------|------|----------------|
//! | [`Project`] | `/projects` | Get, List, Create, Update, Delete |
//! | [`Group`] | `/groups` | Get, List, Create, Update, Delete |
//! | [`User`] | `/users` | Get, List, Create, Update, Delete |
//! | [`CurrentUser`] | `/user` | `GetWithoutId` |
//! | [`Feature`] | `/features` | List, Delete, Set (`POST`) |
//! | [`Snippet`] | `/snippets` | Get, List, Create, Update, Delete |
//! | [`ProjectIssue`] | `/projects/{project_id}/issues` | Get, List, Create, Update, Delete |
//! | [`ProjectIssueNote`] | `/projects/{project_id}/issues/{issue_iid}/notes` | Get, List, Create, Update, Delete |
//! | [`ProjectMergeRequest`] | `/projects/{project_id}/merge_requests` | Get, List, Create, Update, Delete |
//! | [`ProjectVariable`] | `/projects/{project_id}/variables` | Get, List, Create, Update, Delete, Set |
//! | [`AccessRequest`] | `/{projects,groups}/{id}/access_requests` | List, Create, Delete |
//! | [`Badge`] | `/{projects,groups}/{id}/badges` | Get, List, Create, Update, Delete, Render |
//! | [`Milestone`] | `/{projects,groups}/{id}/milestones` | Get, List, Create, Update, Delete |
//! | [`Label`] | `/{projects,groups}/{id}/labels` | Get, List, Create, Update, Delete |
//! | [`NotificationSettings`] | `[/{projects,groups}/{id}]/notification_settings` | `GetWithoutId`, Update |
//!
//! [`RestObject`]: crate::rest::RestObject
//! [`RestManager`]: crate::rest::RestManager

mod access_requests;
mod badges;
mod features;
mod groups;
mod issues;
mod labels;
mod merge_requests;
mod milestones;
mod notes;
mod notification_settings;
mod projects;
mod snippets;
mod users;
mod variables;

pub use access_requests::{
    AccessRequest, AccessRequestManager, GROUP_ACCESS_REQUEST, PROJECT_ACCESS_REQUEST,
};
pub use badges::{Badge, BadgeManager, GROUP_BADGE, PROJECT_BADGE};
pub use features::{Feature, FeatureManager, FEATURE};
pub use groups::{Group, GroupManager, GROUP};
pub use issues::{
    GroupIssueManager, ProjectIssue, ProjectIssueManager, GROUP_ISSUE, PROJECT_ISSUE,
};
pub use labels::{Label, LabelManager, GROUP_LABEL, PROJECT_LABEL};
pub use merge_requests::{ProjectMergeRequest, ProjectMergeRequestManager, PROJECT_MERGE_REQUEST};
pub use milestones::{Milestone, MilestoneManager, GROUP_MILESTONE, PROJECT_MILESTONE};
pub use notes::{ProjectIssueNote, ProjectIssueNoteManager, PROJECT_ISSUE_NOTE};
pub use notification_settings::{
    NotificationSettings, NotificationSettingsManager, GROUP_NOTIFICATION_SETTINGS,
    NOTIFICATION_SETTINGS, PROJECT_NOTIFICATION_SETTINGS,
};
pub use projects::{Project, ProjectManager, PROJECT};
pub use snippets::{Snippet, SnippetManager, SNIPPET};
pub use users::{CurrentUser, CurrentUserManager, User, UserManager, CURRENT_USER, USER};
pub use variables::{ProjectVariable, ProjectVariableManager, PROJECT_VARIABLE};
