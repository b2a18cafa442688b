use anyhow::{anyhow, Result as AnyResult};
use solana_sdk::signer::keypair::Keypair;

/// Parses operator key material as passed through the environment.
pub fn parse_keypair(secret_string: &str) -> AnyResult<Keypair> {
    // Try to decode the secret string as a JSON array of ints first and then as a base58 encoded string to support Phantom private keys.
    let secret_bytes: Vec<u8> = match serde_json::from_str(secret_string) {
        Ok(bytes) => bytes,
        Err(_) => match bs58::decode(secret_string.trim()).into_vec() {
            Ok(bytes) => bytes,
            Err(_) => return Err(anyhow!("Unsupported key type!")),
        },
    };

    let keypair = Keypair::from_bytes(&secret_bytes)?;
    Ok(keypair)
}
