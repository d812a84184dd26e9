use doh_relay_domain::JsonQuery;
use serde::Deserialize;

/// `GET /resolve` parameters, in the style of the Google JSON DNS API.
#[derive(Deserialize, Debug)]
pub struct ResolveParams {
    pub name: Option<String>,

    #[serde(rename = "type", default = "default_record_type")]
    pub record_type: String,

    #[serde(rename = "do")]
    pub dnssec_ok: Option<String>,

    pub cd: Option<String>,
}

fn default_record_type() -> String {
    "A".to_string()
}

fn flag(value: &Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("True")
    )
}

impl ResolveParams {
    pub fn into_query(self) -> Option<JsonQuery> {
        let name = self.name?;
        let mut query = JsonQuery::new(name, self.record_type);
        query.dnssec_ok = flag(&self.dnssec_ok);
        query.checking_disabled = flag(&self.cd);
        Some(query)
    }
}
