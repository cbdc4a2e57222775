use soroban_sdk::{token, Address, Env, String};

use crate::storage_types::*;

/// Funding token configured at initialization.
pub fn token_address(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

/// Move a donation from the donor into the contract's escrow.
pub fn collect_donation(env: &Env, donor: &Address, amount: i128) -> Result<(), Error> {
    let token_client = token::TokenClient::new(env, &token_address(env)?);
    if token_client.balance(donor) < amount {
        return Err(Error::InsufficientFunds);
    }
    token_client.transfer(donor, &env.current_contract_address(), &amount);
    Ok(())
}

/// Pay out from escrow, either a withdrawal to the creator or a refund.
pub fn pay_out(env: &Env, recipient: &Address, amount: i128) -> Result<(), Error> {
    let token_client = token::TokenClient::new(env, &token_address(env)?);
    token_client.transfer(&env.current_contract_address(), recipient, &amount);
    Ok(())
}

pub fn validate_new_campaign(
    env: &Env,
    title: &String,
    description: &String,
    metadata_uri: &Option<String>,
    goal_amount: i128,
    deadline: u64,
) -> Result<(), Error> {
    if goal_amount <= 0 {
        return Err(Error::InvalidGoalAmount);
    }
    if deadline <= env.ledger().timestamp() {
        return Err(Error::InvalidDeadline);
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(Error::TitleTooLong);
    }
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(Error::DescriptionTooLong);
    }
    if let Some(uri) = metadata_uri {
        if uri.len() > MAX_URI_LEN {
            return Err(Error::UriTooLong);
        }
    }
    Ok(())
}

/// Campaign status is never stored; expiry and goal failure are recomputed
/// from the record on every read.
pub fn derive_status(env: &Env, campaign: &Campaign) -> CampaignStatus {
    if !campaign.is_active {
        return CampaignStatus::Withdrawn;
    }
    if env.ledger().timestamp() <= campaign.deadline {
        CampaignStatus::Funding
    } else if campaign.donated_amount >= campaign.goal_amount {
        CampaignStatus::Succeeded
    } else {
        CampaignStatus::Failed
    }
}
