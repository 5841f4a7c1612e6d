//! OpenAPI document for the REST surface.
//!
//! Pinned to 3.0.3: Open WebUI 0.6.x cannot parse 3.1 documents.

use serde_json::{json, Value};
use sharepoint_graph::DEFAULT_EXPAND;

pub const OPENAPI_VERSION: &str = "3.0.3";

pub const API_TITLE: &str = "sharepoint_tool";

pub fn document() -> Value {
    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": API_TITLE,
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Read-only SharePoint access through Microsoft Graph"
        },
        "paths": {
            "/sites": {
                "get": {
                    "operationId": "search_sites",
                    "summary": "Search Sites",
                    "description": "All sites whose name matches the search term (SharePoint & Teams sites).",
                    "parameters": [{
                        "name": "q",
                        "in": "query",
                        "required": false,
                        "description": "Search term (wildcard = *)",
                        "schema": { "type": "string", "default": "*" }
                    }],
                    "responses": collection_responses("Matching sites")
                }
            },
            "/site/{site_id}/items": {
                "get": {
                    "operationId": "list_items",
                    "summary": "List Items",
                    "description": "Items of a site (including list entries, calendars, etc.).",
                    "parameters": [
                        {
                            "name": "site_id",
                            "in": "path",
                            "required": true,
                            "description": "SharePoint site ID",
                            "schema": { "type": "string" }
                        },
                        {
                            "name": "expand",
                            "in": "query",
                            "required": false,
                            "description": "Properties to expand",
                            "schema": { "type": "string", "default": DEFAULT_EXPAND }
                        }
                    ],
                    "responses": collection_responses("Site items")
                }
            }
        },
        "components": {
            "schemas": {
                "ErrorBody": {
                    "type": "object",
                    "properties": {
                        "error": { "type": "string" },
                        "code": { "type": "string" }
                    },
                    "required": ["error", "code"]
                }
            }
        }
    })
}

fn collection_responses(description: &str) -> Value {
    let error = json!({
        "description": "Upstream or authentication failure",
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorBody" }
            }
        }
    });

    json!({
        "200": {
            "description": description,
            "content": {
                "application/json": {
                    "schema": {
                        "type": "array",
                        "items": { "type": "object", "additionalProperties": true }
                    }
                }
            }
        },
        "502": error.clone(),
        "default": error
    })
}
