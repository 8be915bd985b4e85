/// Метаданные UseCase для идентификации в логах и CLI
pub trait UseCaseMetadata {
    /// Индекс UseCase (например, "u510")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "generate_dataset")
    fn usecase_name() -> &'static str;

    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u510_generate_dataset"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
