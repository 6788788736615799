//! # 错误处理宏

/// 快速创建配置错误的宏
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::AdminError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::AdminError::config(format!($fmt, $($arg)*))
    };
}

/// 快速创建数据库错误的宏
#[macro_export]
macro_rules! database_error {
    ($msg:expr) => {
        $crate::error::AdminError::database($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::AdminError::database(format!($fmt, $($arg)*))
    };
}

/// 快速创建内部错误的宏
#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::error::AdminError::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::AdminError::internal(format!($fmt, $($arg)*))
    };
}

/// 确保条件成立，否则返回配置错误
#[macro_export]
macro_rules! ensure_config {
    ($cond:expr, $msg:expr) => {
        if !($cond) {
            return Err($crate::config_error!($msg));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !($cond) {
            return Err($crate::config_error!($fmt, $($arg)*));
        }
    };
}

/// 确保条件成立，否则返回字段校验错误
#[macro_export]
macro_rules! ensure_validation {
    ($cond:expr, $field:expr, $msg:expr) => {
        if !($cond) {
            return Err($crate::error::AdminError::validation($msg, Some($field)));
        }
    };
    ($cond:expr, $field:expr, $fmt:expr, $($arg:tt)*) => {
        if !($cond) {
            return Err($crate::error::AdminError::validation(
                format!($fmt, $($arg)*),
                Some($field),
            ));
        }
    };
}
