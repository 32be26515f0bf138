use types::ValidationError;

error_chain! {
    foreign_links {
        Var(::std::env::VarError);
        Io(::std::io::Error);
        Json(::serde_json::Error);
        R2D2(::r2d2::Error);
        Diesel(::diesel::result::Error);
        Migration(::diesel_migrations::RunMigrationsError);
        Logger(::flexi_logger::FlexiLoggerError);
    }

    errors {
        UserNotFound(username: String) {
            description("user not found")
            display("user `{}` does not exist", username)
        }

        TagNotFound(name: String) {
            description("tag not found")
            display("tag `{}` does not exist", name)
        }

        ArticleNotFound(slug: String) {
            description("article not found")
            display("article `{}` does not exist", slug)
        }

        UniqueViolation(constraint: String, value: String) {
            description("unique constraint violated")
            display("`{}` already holds `{}`", constraint, value)
        }

        InvalidFixtures(errors: ValidationError) {
            description("invalid fixtures")
            display("invalid fixtures: {}", errors)
        }

        MissingConfig(key: String) {
            description("missing configuration value")
            display("`{}` must be set", key)
        }

        InvalidConfig(key: String, value: String) {
            description("invalid configuration value")
            display("`{}` has an invalid value `{}`", key, value)
        }

        PasswordHash {
            description("password hashing failed")
            display("password hashing failed")
        }
    }
}
