use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use env_logger::Env;
use serde::Deserialize;

use tri_pw_core::io::resolve_folder;
use tri_pw_core::model::corpus::{CORPUS_EXTENSION, list_corpora, load_table};
use tri_pw_core::{FrequencyTable, Generator, PasswordRequest, Seed};

/// Name under which the bundled table is exposed.
const BUILTIN_NAME: &str = "builtin";

/// Folder holding the corpus word lists.
const DATA_FOLDER: &str = "./data";

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize, Debug, Default)]
struct GenerateParams {
	length: Option<i64>,
	quantity: Option<i64>,
	word_size: Option<i32>,
	seed: Option<String>, // integer or any text
}

#[derive(Deserialize)]
struct TableQuery {
	name: Option<String>,
}

/// Active table, swapped as a whole by `/v1/load_table`.
struct SharedData {
	name: String,
	table: Arc<FrequencyTable>,
}

impl SharedData {
	fn builtin() -> Self {
		Self { name: BUILTIN_NAME.to_owned(), table: Arc::new(FrequencyTable::builtin().clone()) }
	}
}

impl GenerateParams {
	fn request(&self) -> PasswordRequest {
		PasswordRequest {
			length: self.length,
			quantity: self.quantity,
			word_size: self.word_size,
			// Without a seed every request gets its own random stream.
			seed: Some(self.seed.as_deref().map_or_else(Seed::random, Seed::parse)),
		}
	}
}

/// Generates the passwords of a request, one per line.
fn generate_text(table: &FrequencyTable, params: &GenerateParams) -> Result<String, HttpResponse> {
	let request = params.request().resolve().map_err(|e| HttpResponse::BadRequest().body(e.to_string()))?;
	let generator = Generator::new(table).map_err(|e| HttpResponse::InternalServerError().body(e.to_string()))?;

	match generator.generate_batch(&request, &mut request.seed.rng()) {
		Ok(passwords) => Ok(passwords.join("\n")),
		Err(e) if e.is_bad_input() => Err(HttpResponse::BadRequest().body(e.to_string())),
		Err(e) => Err(HttpResponse::InternalServerError().body(e.to_string())),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a batch of passwords from the active table. Query fields left
/// out use the CLI defaults (length 9, quantity 8, word size 6).
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let table = match data.lock() {
		Ok(shared) => Arc::clone(&shared.table),
		Err(_) => return HttpResponse::InternalServerError().body("Table lock failed"),
	};

	match generate_text(&table, &query) {
		Ok(body) => HttpResponse::Ok().body(body),
		Err(response) => response,
	}
}

#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match list_corpora(resolve_folder(DATA_FOLDER)) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

#[get("/v1/table")]
async fn get_table(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Table lock failed"),
	};
	HttpResponse::Ok().body(format!(
		"{}\ntotal={}\nobserved={}",
		shared.name,
		shared.table.total(),
		shared.table.observed()
	))
}

#[put("/v1/load_table")]
async fn put_table(data: web::Data<Mutex<SharedData>>, query: web::Query<TableQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim().to_owned(),
		_ => return HttpResponse::BadRequest().body("Missing or empty table name"),
	};
	if name.contains(['/', '\\']) || name.starts_with('.') {
		return HttpResponse::BadRequest().body("Invalid table name");
	}

	let loaded = if name == BUILTIN_NAME {
		SharedData::builtin()
	} else {
		let path = resolve_folder(DATA_FOLDER).join(format!("{name}.{CORPUS_EXTENSION}"));
		let table = match load_table(&path) {
			Ok(t) => t,
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load table: {e}")),
		};
		if let Err(e) = Generator::new(&table) {
			return HttpResponse::BadRequest().body(format!("Unusable table: {e}"));
		}
		SharedData { name, table: Arc::new(table) }
	};

	let mut shared = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Table lock failed"),
	};
	log::info!("active table: {}", loaded.name);
	*shared = loaded;

	HttpResponse::Ok().body("Table loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with the bundled table, wraps it in a `Mutex` for swapping,
/// and serves the REST API on 127.0.0.1:5000.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let shared_table = web::Data::new(Mutex::new(SharedData::builtin()));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_table.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(get_table)
			.service(put_table)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;

	fn shared() -> web::Data<Mutex<SharedData>> {
		web::Data::new(Mutex::new(SharedData::builtin()))
	}

	#[actix_web::test]
	async fn generates_seeded_batches() {
		let app = test::init_service(App::new().app_data(shared()).service(get_generated)).await;

		let mut bodies = Vec::new();
		for _ in 0..2 {
			let req = test::TestRequest::get()
				.uri("/v1/generate?length=9&quantity=3&word_size=6&seed=42")
				.to_request();
			let body = test::call_and_read_body(&app, req).await;
			bodies.push(String::from_utf8(body.to_vec()).unwrap());
		}

		assert_eq!(bodies[0], bodies[1]);
		let lines: Vec<&str> = bodies[0].lines().collect();
		assert_eq!(lines.len(), 3);
		for line in lines {
			assert_eq!(line.len(), 9);
			assert!(line.as_bytes()[0].is_ascii_uppercase() && line.as_bytes()[6].is_ascii_uppercase());
		}
	}

	#[actix_web::test]
	async fn bad_input_is_a_400() {
		let app = test::init_service(App::new().app_data(shared()).service(get_generated)).await;
		for uri in [
			"/v1/generate?length=300",
			"/v1/generate?quantity=-1",
			"/v1/generate?quantity=10000000000",
			"/v1/generate?word_size=-6",
		] {
			let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
		}
	}

	#[actix_web::test]
	async fn zero_length_is_an_empty_body() {
		let app = test::init_service(App::new().app_data(shared()).service(get_generated)).await;
		let req = test::TestRequest::get().uri("/v1/generate?length=0").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert!(body.is_empty());
	}

	#[actix_web::test]
	async fn table_names_cannot_escape_the_data_folder() {
		let app = test::init_service(App::new().app_data(shared()).service(put_table)).await;
		for uri in ["/v1/load_table?name=../secret", "/v1/load_table?name=", "/v1/load_table"] {
			let resp = test::call_service(&app, test::TestRequest::put().uri(uri).to_request()).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
		}
	}

	#[actix_web::test]
	async fn reports_and_restores_builtin_table() {
		let data = shared();
		let app = test::init_service(App::new().app_data(data.clone()).service(get_table).service(put_table)).await;

		let resp = test::call_service(&app, test::TestRequest::put().uri("/v1/load_table?name=builtin").to_request()).await;
		assert_eq!(resp.status(), StatusCode::OK);

		let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/v1/table").to_request()).await;
		let text = String::from_utf8(body.to_vec()).unwrap();
		assert!(text.starts_with("builtin\n"));
		assert!(text.contains(&format!("total={}", FrequencyTable::builtin().total())));
	}
}
