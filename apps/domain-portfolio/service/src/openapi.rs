use serde_json::{Map, Value, json};

pub const ROUTE_OPENAPI_JSON: &str = "/openapi.json";
pub const ROUTE_API_HEALTH: &str = "/api/health";
pub const ROUTE_API_STATS: &str = "/api/stats";
pub const ROUTE_API_DOMAINS: &str = "/api/domains";
pub const ROUTE_API_DOMAINS_BULK: &str = "/api/domains/bulk";
pub const ROUTE_API_DOMAIN_BY_ID: &str = "/api/domains/:id";
pub const ROUTE_API_EVALUATIONS: &str = "/api/evaluations";
pub const ROUTE_API_SALES: &str = "/api/sales";
pub const ROUTE_API_SETTINGS: &str = "/api/settings";
pub const ROUTE_API_SETTINGS_REMOVE: &str = "/api/settings/remove";

#[derive(Clone, Copy)]
struct OpenApiContract {
    method: &'static str,
    route_path: &'static str,
    operation_id: &'static str,
    summary: &'static str,
    tag: &'static str,
    enveloped: bool,
    request_example: Option<&'static str>,
    response_example: Option<&'static str>,
}

const OPENAPI_CONTRACTS: &[OpenApiContract] = &[
    OpenApiContract {
        method: "get",
        route_path: ROUTE_API_HEALTH,
        operation_id: "health",
        summary: "Liveness probe.",
        tag: "health",
        enveloped: false,
        request_example: None,
        response_example: Some("health"),
    },
    OpenApiContract {
        method: "get",
        route_path: ROUTE_API_STATS,
        operation_id: "portfolioStats",
        summary: "Portfolio totals, ROI and per-category breakdown.",
        tag: "stats",
        enveloped: true,
        request_example: None,
        response_example: Some("stats"),
    },
    OpenApiContract {
        method: "get",
        route_path: ROUTE_API_DOMAINS,
        operation_id: "listDomains",
        summary: "List every domain in the portfolio.",
        tag: "domains",
        enveloped: true,
        request_example: None,
        response_example: None,
    },
    OpenApiContract {
        method: "post",
        route_path: ROUTE_API_DOMAINS,
        operation_id: "createDomain",
        summary: "Add a domain. The expiration date is derived from the purchase date.",
        tag: "domains",
        enveloped: true,
        request_example: Some("domain"),
        response_example: Some("domain"),
    },
    OpenApiContract {
        method: "post",
        route_path: ROUTE_API_DOMAINS_BULK,
        operation_id: "bulkCreateDomains",
        summary: "Add several domains. Invalid elements are reported, not fatal.",
        tag: "domains",
        enveloped: true,
        request_example: Some("bulk"),
        response_example: Some("bulk"),
    },
    OpenApiContract {
        method: "get",
        route_path: ROUTE_API_DOMAIN_BY_ID,
        operation_id: "getDomain",
        summary: "Fetch one domain with its valuation history.",
        tag: "domains",
        enveloped: true,
        request_example: None,
        response_example: Some("domain"),
    },
    OpenApiContract {
        method: "put",
        route_path: ROUTE_API_DOMAIN_BY_ID,
        operation_id: "updateDomain",
        summary: "Overwrite the provided fields of a domain.",
        tag: "domains",
        enveloped: true,
        request_example: Some("domain_patch"),
        response_example: Some("domain"),
    },
    OpenApiContract {
        method: "delete",
        route_path: ROUTE_API_DOMAIN_BY_ID,
        operation_id: "deleteDomain",
        summary: "Remove a domain. Succeeds when the id is unknown.",
        tag: "domains",
        enveloped: true,
        request_example: None,
        response_example: None,
    },
    OpenApiContract {
        method: "post",
        route_path: ROUTE_API_EVALUATIONS,
        operation_id: "addEvaluation",
        summary: "Append a valuation to a domain.",
        tag: "evaluations",
        enveloped: true,
        request_example: Some("evaluation"),
        response_example: None,
    },
    OpenApiContract {
        method: "get",
        route_path: ROUTE_API_SALES,
        operation_id: "listSales",
        summary: "List recorded sales.",
        tag: "sales",
        enveloped: true,
        request_example: None,
        response_example: None,
    },
    OpenApiContract {
        method: "post",
        route_path: ROUTE_API_SALES,
        operation_id: "createSale",
        summary: "Record a sale.",
        tag: "sales",
        enveloped: true,
        request_example: Some("sale"),
        response_example: Some("sale"),
    },
    OpenApiContract {
        method: "get",
        route_path: ROUTE_API_SETTINGS,
        operation_id: "listSettings",
        summary: "Registrar, category and evaluation tool suggestion lists.",
        tag: "settings",
        enveloped: true,
        request_example: None,
        response_example: Some("settings"),
    },
    OpenApiContract {
        method: "post",
        route_path: ROUTE_API_SETTINGS,
        operation_id: "addSetting",
        summary: "Add a value to a suggestion list.",
        tag: "settings",
        enveloped: true,
        request_example: Some("setting"),
        response_example: Some("settings"),
    },
    OpenApiContract {
        method: "post",
        route_path: ROUTE_API_SETTINGS_REMOVE,
        operation_id: "removeSetting",
        summary: "Remove a value from a suggestion list.",
        tag: "settings",
        enveloped: true,
        request_example: Some("setting"),
        response_example: Some("settings"),
    },
];

pub fn openapi_document() -> Value {
    let mut paths = Map::new();
    for contract in OPENAPI_CONTRACTS {
        add_operation(&mut paths, contract);
    }

    json!({
        "openapi": "3.0.2",
        "info": {
            "title": "Domain Portfolio API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "In-memory domain-name portfolio: domains, valuations, sales, suggestion lists and statistics."
        },
        "servers": [
            { "url": "http://localhost:3000" }
        ],
        "paths": Value::Object(paths),
        "components": {
            "schemas": {
                "ApiSuccess": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" }
                    },
                    "required": ["success"],
                    "additionalProperties": true
                },
                "ApiErrorResponse": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" },
                        "message": { "type": "string" },
                        "code": { "type": "string" }
                    },
                    "required": ["success", "message", "code"]
                }
            },
            "responses": {
                "ErrorEnvelope": {
                    "description": "Error response envelope",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/ApiErrorResponse" },
                            "example": {
                                "success": false,
                                "message": "Domain not found",
                                "code": "not_found"
                            }
                        }
                    }
                }
            }
        }
    })
}

fn add_operation(paths: &mut Map<String, Value>, contract: &OpenApiContract) {
    let path = to_openapi_path(contract.route_path);
    let method = contract.method.to_ascii_lowercase();

    let schema = if contract.enveloped {
        json!({ "$ref": "#/components/schemas/ApiSuccess" })
    } else {
        json!({ "type": "object", "additionalProperties": true })
    };

    let mut operation = json!({
        "operationId": contract.operation_id,
        "summary": contract.summary,
        "tags": [contract.tag],
        "responses": {
            "200": {
                "description": "Success",
                "content": {
                    "application/json": { "schema": schema }
                }
            },
            "default": { "$ref": "#/components/responses/ErrorEnvelope" }
        },
        "x-rustRoute": contract.route_path,
    });

    if let Some(example_key) = contract.request_example {
        let object_schema = json!({ "type": "object", "additionalProperties": true });
        let mut request_body = json!({
            "required": true,
            "content": {
                "application/json": { "schema": object_schema.clone() },
                "application/x-www-form-urlencoded": { "schema": object_schema }
            }
        });
        if let Some(example) = request_example(example_key) {
            request_body["content"]["application/json"]["example"] = example;
        }
        operation["requestBody"] = request_body;
    }

    if let Some(example) = contract.response_example.and_then(response_example) {
        operation["responses"]["200"]["content"]["application/json"]["example"] = example;
    }

    let parameters = path_parameters(contract.route_path);
    if !parameters.is_empty() {
        operation["parameters"] = Value::Array(parameters);
    }

    let path_item = paths
        .entry(path)
        .or_insert_with(|| Value::Object(Map::new()));
    if let Some(item) = path_item.as_object_mut() {
        item.insert(method, operation);
    }
}

fn to_openapi_path(route_path: &str) -> String {
    route_path
        .split('/')
        .map(|segment| {
            if let Some(parameter) = segment.strip_prefix(':') {
                format!("{{{parameter}}}")
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<String>>()
        .join("/")
}

fn path_parameters(route_path: &str) -> Vec<Value> {
    route_path
        .split('/')
        .filter_map(|segment| segment.strip_prefix(':'))
        .map(|parameter| {
            json!({
                "name": parameter,
                "in": "path",
                "required": true,
                "schema": {"type": "integer", "format": "int64", "minimum": 0}
            })
        })
        .collect()
}

fn request_example(key: &str) -> Option<Value> {
    match key {
        "domain" => Some(json!({
            "name": "example.com",
            "registrar": "GoDaddy",
            "category": "Tech",
            "purchaseDate": "2023-01-15",
            "status": "Active",
            "purchasePrice": 12.99
        })),
        "domain_patch" => Some(json!({ "status": "For Sale", "purchasePrice": "15.00" })),
        "bulk" => Some(json!({
            "domains": [
                { "name": "alpha.io", "registrar": "Porkbun", "category": "Tech", "purchaseDate": "2024-02-01", "purchasePrice": 9.5 },
                { "name": "beta.shop", "registrar": "Namecheap", "category": "E-commerce", "purchaseDate": "2024-02-03", "purchasePrice": 11 }
            ]
        })),
        "evaluation" => Some(json!({
            "domainId": 1,
            "tool": "Estibot",
            "date": "2024-01-10",
            "value": 450
        })),
        "sale" => Some(json!({
            "domainName": "sold-domain.com",
            "saleDate": "2023-06-15",
            "salePrice": 500,
            "buyer": "John Doe",
            "purchasePrice": 12.99
        })),
        "setting" => Some(json!({ "type": "categories", "value": "Travel" })),
        _ => None,
    }
}

fn response_example(key: &str) -> Option<Value> {
    match key {
        "health" => Some(json!({ "status": "OK", "timestamp": "2024-01-10T12:00:00.000Z" })),
        "stats" => Some(json!({
            "success": true,
            "stats": {
                "totalDomains": 3,
                "soldDomains": 2,
                "totalValue": "650.00",
                "roi": "3049.31",
                "totalInvestment": "53.98",
                "totalSales": "1700.00"
            },
            "categories": [
                { "category": "Business", "domains": 1, "investment": "15.99", "value": "200.00" }
            ]
        })),
        "domain" => Some(json!({
            "success": true,
            "domain": {
                "id": 4,
                "name": "example.com",
                "registrar": "GoDaddy",
                "category": "Tech",
                "purchaseDate": "2023-01-15",
                "expirationDate": "2023-12-15",
                "status": "Active",
                "purchasePrice": 12.99,
                "evaluations": []
            }
        })),
        "bulk" => Some(json!({
            "success": true,
            "domains": [],
            "count": 0,
            "rejected": [{ "index": 1, "message": "purchaseDate: is required" }]
        })),
        "sale" => Some(json!({
            "success": true,
            "sale": {
                "id": 3,
                "domainName": "sold-domain.com",
                "saleDate": "2023-06-15",
                "salePrice": 500.0,
                "buyer": "John Doe",
                "purchasePrice": 12.99
            }
        })),
        "settings" => Some(json!({
            "success": true,
            "settings": {
                "registrars": ["GoDaddy"],
                "categories": ["Tech", "Travel"],
                "evaluationTools": ["Atom"]
            }
        })),
        _ => None,
    }
}
