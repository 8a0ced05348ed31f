use tracing::debug;

/// Low primes used to spread selections across the candidate list.
/// One prime is consumed per selection slot, so the number of users
/// requested from a single list can never exceed `PRIMES.len()`.
const PRIMES: [u64; 6] = [1, 503, 521, 541, 599, 733];

/// Upper bound on how many users a single selection may request.
/// Enforced by `Config::validate`, never inside `select_users` itself.
pub const MAX_SELECTION: usize = PRIMES.len();

/// Deterministically select up to `desired_count` users from `candidates`,
/// excluding `excluded_user` and never picking the same user twice.
///
/// A `desired_count` of 0 means "select everyone left after exclusion",
/// in list order, with no shuffling applied.
///
/// Each pick computes `(key * prime) % pool.len()` with the next prime from
/// the fixed sequence, then removes the picked user so the pool shrinks.
/// The same key against the same candidate list always yields the same
/// result; different keys generally land in different modulus classes.
pub fn select_users(
    key: u64,
    candidates: &[String],
    desired_count: usize,
    excluded_user: &str,
) -> Vec<String> {
    let mut pool: Vec<String> = candidates
        .iter()
        .filter(|c| c.as_str() != excluded_user)
        .cloned()
        .collect();

    debug!(
        key,
        desired_count,
        excluded_user,
        pool = ?pool,
        "selecting users"
    );

    if desired_count == 0 {
        return pool;
    }

    let count = desired_count.min(pool.len());
    let mut result = Vec::with_capacity(count);
    for i in 0..count {
        let index = ((key * PRIMES[i]) % pool.len() as u64) as usize;
        debug!(
            pick = %pool[index],
            "({} * {}) mod {} = {}",
            key,
            PRIMES[i],
            pool.len(),
            index
        );
        result.push(pool.remove(index));
    }

    result
}
