use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use registrar::cli::seeder::{SeedCounts, seed_database};
use registrar::cli::{create_admin, create_department};
use registrar::registrar_config::DatabaseConfig;
use registrar::registrar_db::run_migrations;
use registrar::registrar_models::FacultyId;
use registrar::registrar_observability::init_tracing;
use registrar::state::{AppState, init_app_state};

#[derive(Parser)]
#[command(name = "registrar-cli")]
#[command(about = "Registrar CLI - Administrative tools for the registrar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create an admin account
    CreateAdmin {
        /// Custom user id
        #[arg(short = 'i', long)]
        id: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create an academic department
    CreateDepartment {
        /// Department name
        #[arg(short = 'n', long)]
        name: String,

        /// Owning academic faculty
        #[arg(short = 'f', long)]
        faculty_id: Option<FacultyId>,
    },
    /// Seed the database with fake departments and students
    Seed {
        /// Number of departments to create
        #[arg(short = 'd', long, default_value = "5")]
        departments: usize,

        /// Number of students to create
        #[arg(short = 's', long, default_value = "20")]
        students: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let Some(database) = DatabaseConfig::from_env() else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let state = match init_app_state(&database).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Migrate => handle_migrate(&state).await,
        Commands::CreateAdmin {
            id,
            email,
            password,
        } => handle_create_admin(&state, id, email, password).await,
        Commands::CreateDepartment { name, faculty_id } => {
            handle_create_department(&state, name, faculty_id).await
        }
        Commands::Seed {
            departments,
            students,
        } => handle_seed(&state, departments, students).await,
    }
}

async fn handle_migrate(state: &AppState) {
    match run_migrations(&state.db).await {
        Ok(_) => println!("✅ Migrations applied"),
        Err(e) => {
            eprintln!("❌ Error running migrations: {}", e);
            std::process::exit(1);
        }
    }
}

fn prompt(label: &str) -> String {
    match Input::new().with_prompt(label).interact_text() {
        Ok(value) => value,
        Err(e) => {
            eprintln!("❌ Failed to read {}: {}", label.to_lowercase(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_admin(
    state: &AppState,
    id: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    // Use provided values or prompt interactively
    let id = id.unwrap_or_else(|| prompt("User id"));
    let email = email.unwrap_or_else(|| prompt("Email address"));

    let password = password.unwrap_or_else(|| {
        match Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
        {
            Ok(password) => password,
            Err(e) => {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            }
        }
    });

    let store = state.users();
    match create_admin(&store, &state.bcrypt_config, &id, &email, &password).await {
        Ok(admin) => {
            println!("\n✅ Admin created successfully!");
            println!("   Id: {}", admin.id);
            println!("   Email: {}", admin.email);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_department(state: &AppState, name: String, faculty_id: Option<FacultyId>) {
    let store = state.departments();
    match create_department(&store, &name, faculty_id).await {
        Ok(department) => {
            println!("\n✅ Department created successfully!");
            println!("   Id: {}", department.id);
            println!("   Name: {}", department.name);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating department: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(state: &AppState, departments: usize, students: usize) {
    let counts = SeedCounts {
        departments,
        students,
    };

    match seed_database(&state.departments(), &state.students(), counts).await {
        Ok(report) => {
            println!("\n✅ Seeding complete!");
            println!("   Departments: {}", report.departments.len());
            println!("   Students: {}", report.students.len());
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding database: {}", e);
            std::process::exit(1);
        }
    }
}
