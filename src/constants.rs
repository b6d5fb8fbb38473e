pub struct Constants;

impl Constants {
    /// The only accepted line terminator in the header section of a commit.
    pub const LINE_TERMINATOR: u8 = b'\n';
    pub const HEADER_SEPARATOR: u8 = b' ';
    pub const EMAIL_OPEN: u8 = b'<';
    pub const EMAIL_CLOSE: u8 = b'>';
    pub const HASH_BYTE_LEN: usize = 20;
    pub const HASH_HEX_LEN: usize = Constants::HASH_BYTE_LEN * 2;
    /// Largest accepted hour component of a timezone token, in either direction.
    pub const MAX_OFFSET_HOURS: u32 = 14;
    pub const MINUTES_PER_HOUR: u32 = 60;
}
