//! Target shapes for the known API resources.
//!
//! Each shape wraps the generically mapped [`JsonObject`](crate::JsonObject)
//! and adds typed accessors (and, on `Organization`, membership
//! convenience methods). Shapes include:
//!
//! - `Organization`: org record with user/group membership helpers
//! - `User`, `AuthenticationResponse`, `UserCourseStatus`, `CityList`
//! - `Course`: course summary with nested chapter content
//! - `GroupInfo`, `Workgroup`, `Project`
//! - `Gradebook`: grade summaries for a user or course

pub mod course;
pub mod gradebook;
pub mod group;
pub mod organization;
pub mod user;
pub mod workgroup;

pub use course::Course;
pub use gradebook::Gradebook;
pub use group::GroupInfo;
pub use organization::Organization;
pub use user::{AuthenticationResponse, CityList, User, UserCourseStatus, UserRole};
pub use workgroup::{Project, Workgroup};
