//! Prompt construction for the completion service.
//!
//! The system prompt pins the assistant to JSON-only output with a fixed
//! item schema and embeds the catalog context so product codes can be
//! resolved at the source. Prompts are Spanish because that is the language
//! of the incoming orders.

use std::fmt::Write as _;

use pedidos_core::CatalogProduct;

const SYSTEM_HEADER: &str = "\
Eres un asistente especializado en procesar pedidos comerciales escritos en lenguaje natural \
(WhatsApp, mensajes, notas).

IMPORTANTE: responde unicamente con JSON valido, sin texto adicional.

Estructura de respuesta requerida:
{
  \"confidence\": 0.95,
  \"items\": [
    {
      \"product_name\": \"Nombre del producto\",
      \"product_code\": \"CODIGO123\",
      \"quantity\": 10,
      \"unit\": \"unidades/kg/litros/cajas\",
      \"unit_price\": 3500,
      \"confidence\": 0.9,
      \"notes\": \"observaciones del item\"
    }
  ],
  \"ambiguities\": [\"ambiguedades que requieren aclaracion\"]
}

Reglas:
1. Extrae TODOS los productos mencionados.
2. Identifica cantidades precisas (numeros + unidades).
3. Si hay ambiguedad en cantidad o producto, reportala en \"ambiguities\".
4. Manten los nombres de producto lo mas especificos posible.
5. Cada \"confidence\" es un numero entre 0 y 1.
6. Si no puedes identificar un codigo de producto, dejalo en null.
7. Incluye variaciones como sabores, tamanos y presentaciones.";

/// Builds the system prompt, appending one `- CODE: Name (Category)` line
/// per catalog product when a catalog context is available.
#[must_use]
pub(crate) fn system_prompt(catalog: &[CatalogProduct]) -> String {
    let mut prompt = SYSTEM_HEADER.to_owned();

    if !catalog.is_empty() {
        prompt.push_str("\n\nCATALOGO DE PRODUCTOS DISPONIBLES:\n");
        for product in catalog {
            let _ = write!(prompt, "- {}: {}", product.code, product.name);
            if let Some(category) = &product.category {
                let _ = write!(prompt, " ({category})");
            }
            prompt.push('\n');
        }
        prompt.push_str(
            "\nUsa este catalogo para identificar codigos de productos. Si un producto del \
             pedido coincide con el catalogo, usa el codigo exacto.",
        );
    }

    prompt
}

/// Wraps the raw order text into the user message.
#[must_use]
pub(crate) fn user_prompt(order_text: &str) -> String {
    format!(
        "Analiza el siguiente pedido y conviertelo al formato JSON especificado:\n\n\
         PEDIDO:\n{order_text}\n\n\
         Responde unicamente con el JSON, sin texto adicional."
    )
}
