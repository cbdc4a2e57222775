use soroban_sdk::{contracterror, contracttype, Address, String};

// TTL bounds for instance and persistent entries
pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

// Length bounds, in bytes
pub const MAX_TITLE_LEN: u32 = 200;
pub const MAX_DESCRIPTION_LEN: u32 = 1000;
pub const MAX_URI_LEN: u32 = 200;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    // Instance: funding token address and id counter
    Token,
    NextCampaignId,
    // Persistent: campaign records and the (creator, title) uniqueness index
    Campaign(u64),
    CampaignTitle(Address, String),
    // Persistent: donation records, indexed per campaign, plus a per-donor index
    Donation(u64, u32),
    DonorDonations(Address),
}

/// A fundraising campaign. `donated_amount` tracks the escrowed balance
/// while the campaign is active; refunds decrement it, a withdrawal drains
/// the escrow and deactivates the campaign.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub id: u64,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub goal_amount: i128,
    pub donated_amount: i128,
    pub deadline: u64,
    pub metadata_uri: Option<String>,
    pub is_active: bool,
    pub created_at: u64,
    pub donation_count: u32,
}

/// One contribution to a campaign. The record stays in storage after a
/// refund with `refunded` set, so it cannot be claimed twice.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct DonationRecord {
    pub donor: Address,
    pub campaign_id: u64,
    pub amount: i128,
    pub timestamp: u64,
    pub refunded: bool,
}

/// Handle for looking a donation up from the per-donor index.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct DonationId {
    pub campaign_id: u64,
    pub index: u32,
}

/// Lifecycle state derived at read time from `is_active`, `deadline` and
/// the donated/goal amounts. Never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
#[contracttype]
pub enum CampaignStatus {
    Funding,
    Succeeded,
    Failed,
    Withdrawn,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidGoalAmount = 3,
    InvalidDeadline = 4,
    TitleTooLong = 5,
    DescriptionTooLong = 6,
    UriTooLong = 7,
    CampaignAlreadyExists = 8,
    InvalidDonationAmount = 9,
    CampaignNotActive = 10,
    CampaignExpired = 11,
    Unauthorized = 12,
    CampaignNotExpired = 13,
    GoalNotReached = 14,
    GoalReached = 15,
    InvalidCampaign = 16,
    InsufficientFunds = 17,
    Overflow = 18,
    Underflow = 19,
    CampaignHasDonations = 20,
    AlreadyRefunded = 21,
}
