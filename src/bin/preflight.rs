use pokedex_service::infra::config::{self, StorageKind};
use pokedex_service::{PokeApiClient, PokemonLookup, PokemonRepository, SqlitePokemonRepository};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--lookup <name>]\n\
         \n\
         Reads env vars (all optional):\n\
           DATABASE_URL, STORAGE, POKEAPI_BASE_URL, POKEAPI_TIMEOUT_SECS, PORT, BIND_HOST\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let sample = match args.iter().position(|a| a == "--lookup") {
        Some(i) => match args.get(i + 1) {
            Some(name) => name.clone(),
            None => usage_and_exit(),
        },
        None => "pikachu".to_string(),
    };

    // Force-read config (nice error messages if something is malformed)
    let storage = config::storage_kind()?;
    let database_url = config::database_url();
    let bind_addr = config::bind_addr()?;
    let client = PokeApiClient::from_env()?;

    println!("> Preflight:");
    println!("  STORAGE={:?}", storage);
    println!("  DATABASE_URL={}", database_url);
    println!("  BIND={}", bind_addr);
    println!("  POKEAPI_BASE_URL={}", client.base_url());

    if storage == StorageKind::Sqlite {
        let repo = SqlitePokemonRepository::connect(&database_url).await?;
        repo.ping().await?;
        let count = repo.find_all().await?.len();
        println!("  Database: reachable ({} stored pokemons)", count);
    } else {
        println!("  Database: skipped (in-memory store)");
    }

    match client.fetch_by_name(&sample).await? {
        Some(found) => println!(
            "  PokeAPI: `{}` -> {} (types: {})",
            sample,
            found.canonical_name,
            found.types.join(", ")
        ),
        None => anyhow::bail!("PokeAPI reachable but does not know `{}`", sample),
    }

    println!("> Preflight OK.");
    Ok(())
}
