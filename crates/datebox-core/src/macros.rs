/// Read a DATEBOX setting from the environment, falling back to the default
/// declared in `datebox_core::config`.
///
/// The single-argument form returns a `String`. The typed form parses the env
/// value and logs a warning before falling back when it does not parse.
#[macro_export]
macro_rules! get_datebox_setting {
    ($setting:ident) => {
        ::std::env::var(stringify!($setting)).unwrap_or($crate::config::$setting.to_string())
    };
    ($setting:ident, $typ:ty) => {
        match ::std::env::var(stringify!($setting)) {
            Ok(v) => match v.trim().parse::<$typ>() {
                Ok(i) => i,
                Err(_e) => {
                    ::log::warn!(
                        "Env var setting {} is not a valid {}. Using default",
                        stringify!($setting),
                        stringify!($typ)
                    );
                    $crate::config::$setting
                }
            },
            Err(_e) => $crate::config::$setting,
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_setting_defaults_without_env() {
        let week_start = get_datebox_setting!(DATEBOX_WEEK_START);
        assert_eq!(week_start, "sunday");
    }

    #[test]
    fn test_setting_reads_env_override() {
        // SAFETY: no other test in this crate touches this variable
        unsafe { ::std::env::set_var("DATEBOX_TUI_TICK_MS", "40") };
        assert_eq!(get_datebox_setting!(DATEBOX_TUI_TICK_MS, u64), 40);

        unsafe { ::std::env::set_var("DATEBOX_TUI_TICK_MS", "soon") };
        assert_eq!(get_datebox_setting!(DATEBOX_TUI_TICK_MS, u64), 16);

        unsafe { ::std::env::remove_var("DATEBOX_TUI_TICK_MS") };
    }
}
