use clap::{Parser, Subcommand};

/// Care meal planner: personalizes the master menu for each resident and
/// turns the result into an ingredient order sheet.
#[derive(Parser, Debug)]
#[command(name = "care_meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding menu, category, nutrient, ingredient and patient tables.
    #[arg(short, long, global = true, default_value = ".")]
    pub data_dir: String,

    /// Planner policy JSON file.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Inventory CSV. A mock inventory is generated when omitted.
    #[arg(short, long, global = true)]
    pub inventory: Option<String>,

    /// Seed for substitution tie-breaks and mock stock.
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Preamble rows before the header line of the patient table.
    #[arg(long, global = true, default_value_t = 3)]
    pub patient_header_row: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Personalize one patient's meal for a service date.
    Plan {
        /// Patient name (fuzzy matched).
        #[arg(short, long)]
        patient: Option<String>,

        /// Service date as it appears in the menu table.
        #[arg(short = 't', long)]
        date: Option<String>,

        /// Write the personalized menu to this CSV file.
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Personalize every patient and build the ingredient order sheet.
    Order {
        /// Service date as it appears in the menu table.
        #[arg(short = 't', long)]
        date: Option<String>,

        /// Write the order sheet to this CSV file.
        #[arg(short, long)]
        export: Option<String>,

        /// Split aggregation into this many parallel partitions.
        #[arg(short, long, default_value_t = 1)]
        workers: usize,
    },

    /// Summarize current stock and low-stock items.
    Inventory,

    /// Print the advisory request for one patient as JSON.
    Advise {
        /// Patient name (fuzzy matched).
        #[arg(short, long)]
        patient: Option<String>,

        /// Service date as it appears in the menu table.
        #[arg(short = 't', long)]
        date: Option<String>,

        /// Question to attach. Prompted for when omitted.
        #[arg(short, long)]
        question: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            patient: None,
            date: None,
            export: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_order_flags() {
        let cli = Cli::parse_from([
            "care_meal_planner",
            "--seed",
            "7",
            "order",
            "--date",
            "2024-03-01",
            "--workers",
            "4",
        ]);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.patient_header_row, 3);
        match cli.command {
            Some(Command::Order { date, workers, .. }) => {
                assert_eq!(date.as_deref(), Some("2024-03-01"));
                assert_eq!(workers, 4);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
