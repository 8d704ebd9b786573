use anyhow::{Context, anyhow, bail};
use kubectl_adapter::{Handle, Kubectl, ResourceKind, Selector};
use serde_json::Value;
use tracing::{debug, info};

const USAGE: &str = "usage: kubectl-adapter <pod|rc|service|node> <verb> [args...]";

enum Outcome {
    Json(Value),
    Text(String),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let kubectl = Kubectl::from_env()?;
    debug!("Using {:?}", kubectl.pod.config());

    let argv = std::env::args().skip(1).collect::<Vec<_>>();
    let (kind, verb, rest) = match argv.as_slice() {
        [kind, verb, rest @ ..] => (kind.as_str(), verb.as_str(), rest),
        _ => bail!(USAGE),
    };
    info!("Running {verb} on {kind}");

    let outcome = match kind {
        "pod" | "pods" => match (verb, rest) {
            ("logs", [pod]) => Some(Outcome::Text(kubectl.pod.logs(pod).await?)),
            ("logs", [pod, container]) => Some(Outcome::Text(
                kubectl.pod.logs(&format!("{pod} {container}")).await?,
            )),
            ("port-forward", [pod, ports]) => {
                Some(Outcome::Text(kubectl.pod.port_forward(pod, ports).await?))
            }
            _ => common(&kubectl.pod, verb, rest).await?,
        },
        "rc" => match (verb, rest) {
            ("scale", [name, replicas]) => {
                let replicas = replicas
                    .parse()
                    .with_context(|| format!("Invalid replica count: {replicas}"))?;
                Some(Outcome::Text(kubectl.rc.scale(name, replicas).await?))
            }
            ("rolling-update", [name, image]) => {
                Some(Outcome::Text(kubectl.rc.rolling_update(name, image).await?))
            }
            ("rolling-update-file", [name, file]) => Some(Outcome::Text(
                kubectl.rc.rolling_update_by_file(name, file).await?,
            )),
            _ => common(&kubectl.rc, verb, rest).await?,
        },
        "service" => common(&kubectl.service, verb, rest).await?,
        "node" => common(&kubectl.node, verb, rest).await?,
        _ => bail!("Unknown resource kind: {kind}\n{USAGE}"),
    };

    match outcome.ok_or_else(|| anyhow!("Unsupported verb for {kind}: {verb}"))? {
        Outcome::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Outcome::Text(text) => print!("{text}"),
    }

    Ok(())
}

async fn common<K: ResourceKind>(
    handle: &Handle<K>,
    verb: &str,
    rest: &[String],
) -> anyhow::Result<Option<Outcome>> {
    let outcome = match (verb, rest) {
        ("list", labels) => {
            let selector = labels
                .iter()
                .map(|label| {
                    label
                        .split_once('=')
                        .ok_or_else(|| anyhow!("Invalid label, expected key=value: {label}"))
                })
                .collect::<anyhow::Result<Selector>>()?;
            let selector = (!selector.is_empty()).then_some(&selector);
            Outcome::Json(handle.list(selector).await?)
        }
        ("get", [name]) => Outcome::Json(handle.get(name).await?),
        ("describe", [name]) => Outcome::Text(handle.describe(name).await?),
        ("create", [file]) => Outcome::Text(handle.create(file).await?),
        ("delete", [id]) => Outcome::Text(handle.delete(id).await?),
        ("update", [file]) => Outcome::Text(handle.update(file).await?),
        ("apply", [name, patch]) => {
            let patch: Value = serde_json::from_str(patch).context("Invalid JSON patch")?;
            Outcome::Text(handle.apply(name, &patch).await?)
        }
        ("use-context", [context]) => Outcome::Text(handle.use_context(context).await?),
        ("view-context", []) => Outcome::Json(handle.view_context().await?),
        _ => return Ok(None),
    };
    Ok(Some(outcome))
}
