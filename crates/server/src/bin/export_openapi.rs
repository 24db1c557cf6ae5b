// Export OpenAPI specification as JSON
//
// Usage: cargo run --bin export-openapi > docs/api/openapi.json
//
// This binary generates the OpenAPI spec without starting the server.

use tiergate_server::openapi::ApiDoc;

fn main() {
    println!("{}", ApiDoc::to_json());
}
