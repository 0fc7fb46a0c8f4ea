use soroban_sdk::auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation};
use soroban_sdk::{Address, Env, IntoVal, Symbol, Vec};

use crate::errors::ControllerError;
use crate::events::ExternalCallFailed;
use crate::storage::{self, AccessControlClient, DataKey};

pub fn require_admin(env: &Env) -> Result<Address, ControllerError> {
    let admin = storage::get_admin(env)?;
    storage::bump_core_ttl(env);
    admin.require_auth();
    Ok(admin)
}

/// Authenticates `caller` and asks the access-control manager whether it may
/// invoke `function`.
pub fn ensure_allowed(env: &Env, caller: &Address, function: &str) -> Result<(), ControllerError> {
    caller.require_auth();
    let acm = storage::get_address(env, &DataKey::AccessControl)
        .ok_or(ControllerError::AccessControlNotSet)?;
    storage::bump_core_ttl(env);
    let allowed =
        AccessControlClient::new(env, &acm).is_allowed_to_call(caller, &Symbol::new(env, function));
    if !allowed {
        return Err(ControllerError::Unauthorized);
    }
    Ok(())
}

pub fn to_i128(amount: u128) -> Result<i128, ControllerError> {
    i128::try_from(amount).map_err(|_| ControllerError::MathOverflow)
}

/// Invokes `func` on `contract` without aborting on failure. A failed call is
/// published as `ExternalCallFailed` and reported as `None`.
pub(crate) fn try_call_contract<T, A>(env: &Env, contract: &Address, func: &str, args: A) -> Option<T>
where
    T: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
    A: IntoVal<Env, Vec<soroban_sdk::Val>>,
{
    use soroban_sdk::{InvokeError, Val};
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

/// Pre-authorizes a `transfer` out of this contract that a market performs
/// on our behalf.
pub(crate) fn authorize_transfer_from_self(env: &Env, token: &Address, to: &Address, amount: i128) {
    let from = env.current_contract_address();
    let args = (from, to.clone(), amount).into_val(env);
    let ctx = ContractContext {
        contract: token.clone(),
        fn_name: Symbol::new(env, "transfer"),
        args,
    };
    let mut auths = Vec::new(env);
    auths.push_back(InvokerContractAuthEntry::Contract(SubContractInvocation {
        context: ctx,
        sub_invocations: Vec::new(env),
    }));
    env.authorize_as_current_contract(auths);
}
