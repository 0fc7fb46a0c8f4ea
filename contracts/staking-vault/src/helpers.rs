use soroban_sdk::{Address, Env, IntoVal, Symbol, Val, Vec};

use crate::errors::VaultError;
use crate::events::ExternalCallFailed;
use crate::storage::{self, AccessControlClient, DataKey};

pub fn require_admin(env: &Env) -> Result<Address, VaultError> {
    let admin = storage::get_admin(env)?;
    storage::bump_core_ttl(env);
    admin.require_auth();
    Ok(admin)
}

pub fn ensure_allowed(env: &Env, caller: &Address, function: &str) -> Result<(), VaultError> {
    caller.require_auth();
    let acm = storage::get_address(env, &DataKey::AccessControl)
        .ok_or(VaultError::AccessControlNotSet)?;
    storage::bump_core_ttl(env);
    let allowed =
        AccessControlClient::new(env, &acm).is_allowed_to_call(caller, &Symbol::new(env, function));
    if !allowed {
        return Err(VaultError::Unauthorized);
    }
    Ok(())
}

pub fn ensure_not_paused(env: &Env) -> Result<(), VaultError> {
    if storage::is_paused(env) {
        return Err(VaultError::VaultPaused);
    }
    Ok(())
}

pub fn to_i128(amount: u128) -> Result<i128, VaultError> {
    i128::try_from(amount).map_err(|_| VaultError::MathOverflow)
}

/// Invokes `func` on `contract`, publishing `ExternalCallFailed` and
/// returning `None` instead of aborting when the callee fails.
pub(crate) fn try_call_contract<T, A>(env: &Env, contract: &Address, func: &str, args: A) -> Option<T>
where
    T: soroban_sdk::TryFromVal<Env, Val>,
    A: IntoVal<Env, Vec<Val>>,
{
    use soroban_sdk::InvokeError;
    let symbol = Symbol::new(env, func);
    let args_val: Vec<Val> = args.into_val(env);
    match env.try_invoke_contract::<T, InvokeError>(contract, &symbol, args_val) {
        Ok(Ok(val)) => Some(val),
        _ => {
            ExternalCallFailed {
                contract: contract.clone(),
                function: symbol,
            }
            .publish(env);
            None
        }
    }
}
