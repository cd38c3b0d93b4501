pub mod time_fields;
