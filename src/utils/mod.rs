pub mod baseline_cache;
pub mod db_utils;
