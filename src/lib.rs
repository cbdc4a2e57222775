#![no_std]

mod campaign;
mod events;
mod storage_types;


use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};
use storage_types::*;

pub use campaign::*;

#[contract]
pub struct CrowdfundContract;

#[contractimpl]
impl CrowdfundContract {
    /// Initialize the contract with the funding token address.
    pub fn initialize(env: Env, token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Token) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::NextCampaignId, &1u64);
        extend_instance(&env);

        Ok(())
    }

    /// Create a new campaign. Each creator may hold at most one campaign
    /// per title; the pair is freed again when the campaign is deleted.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        title: String,
        description: String,
        goal_amount: i128,
        deadline: u64,
        metadata_uri: Option<String>,
    ) -> Result<u64, Error> {
        creator.require_auth();

        campaign::validate_new_campaign(
            &env,
            &title,
            &description,
            &metadata_uri,
            goal_amount,
            deadline,
        )?;

        let title_key = DataKey::CampaignTitle(creator.clone(), title.clone());
        if env.storage().persistent().has(&title_key) {
            return Err(Error::CampaignAlreadyExists);
        }

        let campaign_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextCampaignId)
            .ok_or(Error::NotInitialized)?;

        let record = Campaign {
            id: campaign_id,
            creator: creator.clone(),
            title,
            description,
            goal_amount,
            donated_amount: 0,
            deadline,
            metadata_uri,
            is_active: true,
            created_at: env.ledger().timestamp(),
            donation_count: 0,
        };

        env.storage().persistent().set(&DataKey::Campaign(campaign_id), &record);
        env.storage().persistent().set(&title_key, &campaign_id);
        env.storage().instance().set(&DataKey::NextCampaignId, &(campaign_id + 1));

        extend_persistent(&env, &DataKey::Campaign(campaign_id));
        extend_persistent(&env, &title_key);
        extend_instance(&env);

        events::emit_campaign_created(
            &env,
            events::CampaignCreatedEvent {
                campaign_id,
                creator,
                goal_amount,
                deadline,
            },
        );

        Ok(campaign_id)
    }

    /// Contribute to an active, unexpired campaign. Returns the donation id,
    /// unique per campaign so one donor can contribute any number of times.
    /// Contributions past the goal are accepted.
    pub fn donate(
        env: Env,
        donor: Address,
        campaign_id: u64,
        amount: i128,
    ) -> Result<u32, Error> {
        donor.require_auth();

        let mut record: Campaign = env
            .storage()
            .persistent()
            .get(&DataKey::Campaign(campaign_id))
            .ok_or(Error::InvalidCampaign)?;

        if amount <= 0 {
            return Err(Error::InvalidDonationAmount);
        }
        if !record.is_active {
            return Err(Error::CampaignNotActive);
        }
        let now = env.ledger().timestamp();
        if now > record.deadline {
            return Err(Error::CampaignExpired);
        }

        campaign::collect_donation(&env, &donor, amount)?;

        record.donated_amount = record
            .donated_amount
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        let donation_id = record.donation_count;
        record.donation_count += 1;

        let donation = DonationRecord {
            donor: donor.clone(),
            campaign_id,
            amount,
            timestamp: now,
            refunded: false,
        };

        env.storage()
            .persistent()
            .set(&DataKey::Donation(campaign_id, donation_id), &donation);
        env.storage().persistent().set(&DataKey::Campaign(campaign_id), &record);

        let donor_key = DataKey::DonorDonations(donor.clone());
        let mut donor_index: Vec<DonationId> = env
            .storage()
            .persistent()
            .get(&donor_key)
            .unwrap_or(Vec::new(&env));
        donor_index.push_back(DonationId {
            campaign_id,
            index: donation_id,
        });
        env.storage().persistent().set(&donor_key, &donor_index);

        extend_persistent(&env, &DataKey::Donation(campaign_id, donation_id));
        extend_persistent(&env, &DataKey::Campaign(campaign_id));
        extend_persistent(&env, &donor_key);
        extend_instance(&env);

        events::emit_donation_made(
            &env,
            events::DonationMadeEvent {
                campaign_id,
                donor,
                amount,
                total_donated: record.donated_amount,
            },
        );

        Ok(donation_id)
    }

    /// Withdraw the full escrowed balance. Only the creator, only after the
    /// deadline, and only if the goal was reached. Deactivates the campaign,
    /// so a second withdrawal fails with `CampaignNotActive`.
    pub fn withdraw(env: Env, creator: Address, campaign_id: u64) -> Result<(), Error> {
        creator.require_auth();

        let mut record: Campaign = env
            .storage()
            .persistent()
            .get(&DataKey::Campaign(campaign_id))
            .ok_or(Error::InvalidCampaign)?;

        if creator != record.creator {
            return Err(Error::Unauthorized);
        }
        if !record.is_active {
            return Err(Error::CampaignNotActive);
        }
        if env.ledger().timestamp() <= record.deadline {
            return Err(Error::CampaignNotExpired);
        }
        if record.donated_amount < record.goal_amount {
            return Err(Error::GoalNotReached);
        }

        let amount = record.donated_amount;
        campaign::pay_out(&env, &creator, amount)?;

        record.is_active = false;
        env.storage().persistent().set(&DataKey::Campaign(campaign_id), &record);
        extend_persistent(&env, &DataKey::Campaign(campaign_id));

        events::emit_funds_withdrawn(
            &env,
            events::FundsWithdrawnEvent {
                campaign_id,
                creator,
                amount,
            },
        );

        Ok(())
    }

    /// Return a donation to its donor. Only available once the campaign has
    /// concluded below its goal, and only once per donation record.
    pub fn refund(
        env: Env,
        donor: Address,
        campaign_id: u64,
        donation_id: u32,
    ) -> Result<(), Error> {
        donor.require_auth();

        let mut record: Campaign = env
            .storage()
            .persistent()
            .get(&DataKey::Campaign(campaign_id))
            .ok_or(Error::InvalidCampaign)?;

        let mut donation: DonationRecord = env
            .storage()
            .persistent()
            .get(&DataKey::Donation(campaign_id, donation_id))
            .ok_or(Error::InvalidCampaign)?;

        if donation.donor != donor {
            return Err(Error::Unauthorized);
        }
        if !record.is_active {
            return Err(Error::CampaignNotActive);
        }
        if env.ledger().timestamp() <= record.deadline {
            return Err(Error::CampaignNotExpired);
        }
        if record.donated_amount >= record.goal_amount {
            return Err(Error::GoalReached);
        }
        if donation.refunded {
            return Err(Error::AlreadyRefunded);
        }

        record.donated_amount = record
            .donated_amount
            .checked_sub(donation.amount)
            .ok_or(Error::Underflow)?;

        campaign::pay_out(&env, &donor, donation.amount)?;

        donation.refunded = true;
        env.storage()
            .persistent()
            .set(&DataKey::Donation(campaign_id, donation_id), &donation);
        env.storage().persistent().set(&DataKey::Campaign(campaign_id), &record);

        extend_persistent(&env, &DataKey::Donation(campaign_id, donation_id));
        extend_persistent(&env, &DataKey::Campaign(campaign_id));

        events::emit_refund_issued(
            &env,
            events::RefundIssuedEvent {
                campaign_id,
                donation_id,
                donor,
                amount: donation.amount,
            },
        );

        Ok(())
    }

    /// Delete a campaign that holds no donor funds, reclaiming its storage.
    /// The (creator, title) pair becomes available again.
    pub fn delete_campaign(env: Env, creator: Address, campaign_id: u64) -> Result<(), Error> {
        creator.require_auth();

        let record: Campaign = env
            .storage()
            .persistent()
            .get(&DataKey::Campaign(campaign_id))
            .ok_or(Error::InvalidCampaign)?;

        if creator != record.creator {
            return Err(Error::Unauthorized);
        }
        if record.donated_amount != 0 {
            return Err(Error::CampaignHasDonations);
        }

        // Fully refunded campaigns may still carry consumed donation records.
        for donation_id in 0..record.donation_count {
            env.storage()
                .persistent()
                .remove(&DataKey::Donation(campaign_id, donation_id));
        }

        env.storage()
            .persistent()
            .remove(&DataKey::CampaignTitle(record.creator.clone(), record.title.clone()));
        env.storage().persistent().remove(&DataKey::Campaign(campaign_id));

        events::emit_campaign_deleted(
            &env,
            events::CampaignDeletedEvent {
                campaign_id,
                creator,
            },
        );

        Ok(())
    }

    /// View functions
    pub fn get_campaign(env: Env, campaign_id: u64) -> Option<Campaign> {
        env.storage().persistent().get(&DataKey::Campaign(campaign_id))
    }

    pub fn get_campaigns(env: Env) -> Vec<Campaign> {
        let next_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextCampaignId)
            .unwrap_or(1);

        let mut campaigns = Vec::new(&env);
        for campaign_id in 1..next_id {
            if let Some(record) = env
                .storage()
                .persistent()
                .get::<DataKey, Campaign>(&DataKey::Campaign(campaign_id))
            {
                campaigns.push_back(record);
            }
        }
        campaigns
    }

    pub fn get_campaign_status(env: Env, campaign_id: u64) -> Option<CampaignStatus> {
        env.storage()
            .persistent()
            .get::<DataKey, Campaign>(&DataKey::Campaign(campaign_id))
            .map(|record| campaign::derive_status(&env, &record))
    }

    pub fn get_donation(env: Env, campaign_id: u64, donation_id: u32) -> Option<DonationRecord> {
        env.storage()
            .persistent()
            .get(&DataKey::Donation(campaign_id, donation_id))
    }

    pub fn get_campaign_donations(env: Env, campaign_id: u64) -> Vec<DonationRecord> {
        let mut donations = Vec::new(&env);
        let count = match env
            .storage()
            .persistent()
            .get::<DataKey, Campaign>(&DataKey::Campaign(campaign_id))
        {
            Some(record) => record.donation_count,
            None => return donations,
        };

        for donation_id in 0..count {
            if let Some(donation) = env
                .storage()
                .persistent()
                .get::<DataKey, DonationRecord>(&DataKey::Donation(campaign_id, donation_id))
            {
                donations.push_back(donation);
            }
        }
        donations
    }

    pub fn get_donor_donations(env: Env, donor: Address) -> Vec<DonationRecord> {
        let donor_index: Vec<DonationId> = env
            .storage()
            .persistent()
            .get(&DataKey::DonorDonations(donor))
            .unwrap_or(Vec::new(&env));

        let mut donations = Vec::new(&env);
        for id in donor_index.iter() {
            // Records of deleted campaigns are skipped
            if let Some(donation) = env
                .storage()
                .persistent()
                .get::<DataKey, DonationRecord>(&DataKey::Donation(id.campaign_id, id.index))
            {
                donations.push_back(donation);
            }
        }
        donations
    }

    pub fn get_token(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Token)
    }

    pub fn total_campaigns(env: Env) -> u64 {
        let next_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextCampaignId)
            .unwrap_or(1);
        next_id - 1
    }
}

fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn extend_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
