use soroban_sdk::{contracttype, Address, Symbol};

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub campaign_id: u64,
    pub creator: Address,
    pub goal_amount: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct DonationMadeEvent {
    pub campaign_id: u64,
    pub donor: Address,
    pub amount: i128,
    pub total_donated: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct FundsWithdrawnEvent {
    pub campaign_id: u64,
    pub creator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct RefundIssuedEvent {
    pub campaign_id: u64,
    pub donation_id: u32,
    pub donor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignDeletedEvent {
    pub campaign_id: u64,
    pub creator: Address,
}

pub fn emit_campaign_created(env: &soroban_sdk::Env, event: CampaignCreatedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign_created"),),
        event,
    );
}

pub fn emit_donation_made(env: &soroban_sdk::Env, event: DonationMadeEvent) {
    env.events().publish(
        (Symbol::new(env, "donation_made"),),
        event,
    );
}

pub fn emit_funds_withdrawn(env: &soroban_sdk::Env, event: FundsWithdrawnEvent) {
    env.events().publish(
        (Symbol::new(env, "funds_withdrawn"),),
        event,
    );
}

pub fn emit_refund_issued(env: &soroban_sdk::Env, event: RefundIssuedEvent) {
    env.events().publish(
        (Symbol::new(env, "refund_issued"),),
        event,
    );
}

pub fn emit_campaign_deleted(env: &soroban_sdk::Env, event: CampaignDeletedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign_deleted"),),
        event,
    );
}
