/// Type for network ports
pub type Port = u16;

/// Type for leaderboard ranks as reported by the upstream API
pub type Rank = u64;
