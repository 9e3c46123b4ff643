//! Easydb Sql Executor Macros

/// connection check. used in `executor.rs`
///
/// Equivalent to:
///
/// ```rust,ignore
/// match self.conn.as_mut() {
///     Some(c) => c,
///     None => return Err(SqlError::NoDatabase),
/// }
/// ```
macro_rules! conn_n_err {
    ($conn:expr) => {
        match $conn.as_mut() {
            Some(c) => c,
            None => return Err($crate::SqlError::NoDatabase),
        }
    };
}

pub(crate) use conn_n_err;

/// fetch process. used in `loader.rs`
///
/// Equivalent to:
///
/// ```rust,ignore
/// sqlx::query_with(&stmt.sql, to_arguments(&stmt.values)?)
///     .try_map(|row| srp.process(&row).map_err(|e| e.turn_into_sqlx_decode_error()))
///     .fetch_all(conn)
///     .await?
/// ```
macro_rules! fetch_process {
    ($conn:expr, $stmt:expr, $srp:expr, $fetch_method:ident) => {
        sqlx::query_with(&$stmt.sql, $crate::sql_executor::to_arguments(&$stmt.values)?)
            .try_map(|row: sqlx::mysql::MySqlRow| {
                $srp.process(&row)
                    .map_err(|e| e.turn_into_sqlx_decode_error())
            })
            .$fetch_method($conn)
            .await?
    };
}

pub(crate) use fetch_process;
