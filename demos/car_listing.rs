//! Car listing example: searching, dynamic sorting and both paging strategies
//!
//! Run with `RUST_LOG=pagewise=debug cargo run --example car_listing` to see
//! how rejected sort columns fall back.

use anyhow::Result;
use pagewise::prelude::*;
use tracing_subscriber::EnvFilter;

sortable_record!(Car, {
    "Id" => id: i64,
    "Name" => name: String,
    "EnginePower" => engine_power: i32,
    "DealerMargin" => dealer_margin: f64,
});

/// Cars service: search on `Name`, sort by a whitelisted column, default to `Id`
struct CarService {
    store: InMemoryStore<Car>,
    paginator: Paginator,
}

impl CarService {
    fn new(store: InMemoryStore<Car>) -> Result<Self> {
        let sort = SortOptions::default()
            .with_whitelist(["Name", "EnginePower", "Id"])
            .with_default("Id", false);
        sort.validate::<Car>()?;

        Ok(Self {
            store,
            paginator: Paginator::new(PaginationOptions::default()).with_sort(sort),
        })
    }

    async fn list(
        &self,
        request: &PageRequest,
        search: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<PaginatedResult<CarSummary>> {
        let mut query = self.store.query()?;
        if let Some(predicate) = Predicate::from_search("Name", search) {
            query = query.filter(predicate);
        }

        let page = self
            .paginator
            .paginate_projected(query, request, &CarSummary::from_car, cancel)
            .await?;

        Ok(page)
    }
}

/// What the listing exposes; `dealer_margin` stays internal
#[derive(Debug, serde::Serialize)]
struct CarSummary {
    id: i64,
    name: String,
    engine_power: i32,
}

impl CarSummary {
    fn from_car(car: Car) -> Self {
        Self {
            id: car.id,
            name: car.name,
            engine_power: car.engine_power,
        }
    }
}

fn seed() -> Vec<Car> {
    let models = [
        ("Toyota Corolla", 132),
        ("Honda Civic", 158),
        ("Ford Focus", 150),
        ("Volvo V60", 250),
        ("Toyota Yaris", 116),
        ("Skoda Octavia", 150),
        ("Toyota Supra", 382),
        ("Volkswagen Golf", 150),
        ("Mazda 3", 186),
        ("Toyota Prius", 121),
        ("Kia Ceed", 160),
        ("Hyundai i30", 160),
    ];

    models
        .iter()
        .enumerate()
        .map(|(i, (name, engine_power))| Car {
            id: i as i64 + 1,
            name: name.to_string(),
            engine_power: *engine_power,
            dealer_margin: 800.0 + i as f64 * 75.0,
        })
        .collect()
}

fn print_page(title: &str, page: &PaginatedResult<CarSummary>) -> Result<()> {
    println!("\n📄 {title}");
    for car in &page.items {
        println!("   #{:<3} {:<18} {} hp", car.id, car.name, car.engine_power);
    }
    println!("   meta: {}", serde_json::to_string(&page.meta)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pagewise=info")),
        )
        .init();

    println!("🚗 Pagewise Car Listing Example");

    let service = CarService::new(InMemoryStore::from_rows(seed()))?;
    let cancel = CancellationToken::new();

    let request = PageRequest::new(1, 5).sort_by("enginepower").descending(true);
    let page = service.list(&request, None, &cancel).await?;
    print_page("Most powerful first, exact count", &page)?;

    let request = PageRequest::new(2, 5).sort_by("EnginePower").descending(true);
    let page = service.list(&request, None, &cancel).await?;
    print_page("Page 2, same ordering", &page)?;

    let request = PageRequest::new(1, 3).sort_by("Name").with_total_count(false);
    let page = service.list(&request, Some("toyota"), &cancel).await?;
    print_page("Search 'toyota', probe strategy", &page)?;

    let request = PageRequest::new(1, 4).sort_by("DealerMargin").descending(true);
    let page = service.list(&request, None, &cancel).await?;
    print_page("Forbidden column ignored, default Id order", &page)?;

    let request = PageRequest::new(0, 0);
    let page = service.list(&request, None, &cancel).await?;
    print_page("Out-of-range input clamped", &page)?;

    cancel.cancel();
    match service.list(&PageRequest::default(), None, &cancel).await {
        Err(err) => println!("\n🛑 Cancelled request: {err}"),
        Ok(_) => println!("\n⚠️  Cancelled request unexpectedly completed"),
    }

    Ok(())
}
