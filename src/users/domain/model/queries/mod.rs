pub mod find_user_by_email_query;
