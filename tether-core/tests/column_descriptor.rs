#[cfg(test)]
mod tests {
    use tether_core::{ColumnDefinition, ColumnDescriptor, SqlColumnDescriptor};

    #[test]
    fn describe() {
        let descriptor = SqlColumnDescriptor::mysql();
        assert_eq!(
            descriptor.describe(
                &ColumnDefinition::new("id", "INT")
                    .primary_key()
                    .auto_increment()
            ),
            "`id` INT PRIMARY KEY AUTO_INCREMENT"
        );
        assert_eq!(
            descriptor.describe(
                &ColumnDefinition::new("name", "VARCHAR")
                    .length(32)
                    .not_null()
                    .unique()
                    .default_value("John \"Doe\"")
            ),
            r#"`name` VARCHAR(32) UNIQUE NOT NULL DEFAULT "John ""Doe""""#
        );
        assert_eq!(
            descriptor.describe(&ColumnDefinition::new("we`ird", "TEXT")),
            "`we``ird` TEXT"
        );
    }

    #[test]
    fn clause_order() {
        let column = ColumnDefinition::new("id", "INT")
            .length(11)
            .unique()
            .not_null()
            .default_value("1")
            .primary_key()
            .auto_increment();
        assert_eq!(
            SqlColumnDescriptor::mysql().describe(&column),
            r#"`id` INT(11) UNIQUE NOT NULL DEFAULT "1" PRIMARY KEY AUTO_INCREMENT"#
        );
        assert_eq!(
            SqlColumnDescriptor::sqlite().describe(&column),
            r#"`id` INT(11) UNIQUE NOT NULL DEFAULT "1" PRIMARY KEY AUTOINCREMENT"#
        );
    }

    #[test]
    fn dialects() {
        let column = ColumnDefinition::new("id", "INTEGER")
            .primary_key()
            .auto_increment();
        assert_eq!(
            SqlColumnDescriptor::sqlite().describe(&column),
            "`id` INTEGER PRIMARY KEY AUTOINCREMENT"
        );
        assert_eq!(
            SqlColumnDescriptor::new("IDENTITY").describe(&column),
            "`id` INTEGER PRIMARY KEY IDENTITY"
        );
        assert_eq!(
            SqlColumnDescriptor::new("").describe(&column),
            "`id` INTEGER PRIMARY KEY"
        );
        assert_eq!(SqlColumnDescriptor::default(), SqlColumnDescriptor::mysql());
    }

    #[test]
    fn describe_all() {
        let descriptor = SqlColumnDescriptor::sqlite();
        assert_eq!(descriptor.describe_all(&[]), "");
        assert_eq!(
            descriptor.describe_all(&[
                ColumnDefinition::new("id", "INTEGER").primary_key(),
                ColumnDefinition::new("phone", "VARCHAR")
                    .length(16)
                    .default_value("+48"),
                ColumnDefinition::new("age", "INTEGER").not_null(),
            ]),
            r#"`id` INTEGER PRIMARY KEY, `phone` VARCHAR(16) DEFAULT "+48", `age` INTEGER NOT NULL"#
        );
    }
}
