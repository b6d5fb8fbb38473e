mod identity;
#[allow(clippy::module_inception)]
mod commit;

pub use commit::*;
pub use identity::*;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

pub const TREE_HEADER: &[u8] = b"tree ";
pub const PARENT_HEADER: &[u8] = b"parent ";
pub const AUTHOR_HEADER: &[u8] = b"author ";
pub const COMMITTER_HEADER: &[u8] = b"committer ";
const TIMEZONE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[offset_hour sign:mandatory][offset_minute]");
