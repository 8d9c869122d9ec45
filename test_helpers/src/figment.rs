//! Helpers for running defaults-loading code inside a `figment::Jail`.
//!
//! A jail gives each test a scratch working directory and an isolated
//! environment, so `strongly.toml` files and `STRONGLY_*` variables never
//! leak between tests.

use anyhow::{Result, anyhow};

/// Runs `f` inside a [`figment::Jail`] with an emptied environment and
/// returns its output.
///
/// Variables exported by the host shell (a developer's own `STRONGLY_*`
/// overrides, say) are hidden from `f`; they come back once the jail drops.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        jail.clear_env();
        f(jail).map(|value| output = Some(value))
    })
    .map_err(|err| anyhow!("jailed defaults run failed: {err}"))?;
    output.ok_or_else(|| anyhow!("jail finished without producing a value"))
}

/// Converts any displayable error into a [`figment::Error`] so it can cross
/// a jail closure boundary with `?`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over owned errors from map_err"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_the_closure_value() -> Result<()> {
        let value = with_jail(|jail| {
            jail.set_env("STRONGLY_SAMPLE", "1");
            std::env::var("STRONGLY_SAMPLE").map_err(figment_error)
        })?;
        assert_eq!(value, "1");
        Ok(())
    }

    #[test]
    fn closure_errors_become_anyhow_errors() {
        let result: Result<()> = with_jail(|_| Err(figment_error("boom")));
        let message = result.err().map(|err| err.to_string()).unwrap_or_default();
        assert!(message.contains("boom"), "{message}");
    }

    #[test]
    fn host_variables_are_hidden() -> Result<()> {
        let inherited = with_jail(|_| Ok(std::env::vars_os().count()))?;
        assert_eq!(inherited, 0);
        Ok(())
    }
}
