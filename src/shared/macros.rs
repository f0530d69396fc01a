/***************************************/
/*               Macros                */
/***************************************/
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("ERROR: {}", e);
                std::process::exit(1);
            }
        }
    };
}

/// Locks a mutex, recovering the guard if a previous holder panicked.
#[macro_export]
macro_rules! lock {
    ($mutex:expr) => {
        $mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    };
}
