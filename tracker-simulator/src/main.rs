use colored::*;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use rand::Rng;
use serde_json::json;
use std::io::{self, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Longitud del frame binario antes de comprimir:
/// device_id[16] | lat f64 LE | lng f64 LE | speed f32 LE | timestamp u32 LE
const FRAME_LEN: usize = 40;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "🛰️ Fleet Tracker Simulator".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    // Paso 1: Configuración del backend y del tracker simulado
    let base_url = prompt("Backend URL [http://localhost:8000]: ")?;
    let base_url = if base_url.is_empty() {
        "http://localhost:8000".to_string()
    } else {
        base_url.trim_end_matches('/').to_string()
    };

    let device_id = prompt("Device id [tracker01]: ")?;
    let device_id = if device_id.is_empty() {
        "tracker01".to_string()
    } else {
        device_id
    };

    let client = reqwest::Client::new();
    let mut position = (52.5200_f64, 13.4050_f64);

    // Paso 2: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 📡 Enviar posición JSON");
        println!("2. 📦 Enviar paquete binario");
        println!("3. 🚐 Simular ruta (paquetes binarios en bucle)");
        println!("4. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-4): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        match choice.trim() {
            "1" => {
                position = jitter(position);
                send_json(&client, &base_url, &device_id, position).await?;
            }
            "2" => {
                position = jitter(position);
                send_binary(&client, &base_url, &device_id, position).await?;
            }
            "3" => {
                let count = prompt("Número de paquetes [20]: ")?
                    .parse::<u32>()
                    .unwrap_or(20);
                for i in 0..count {
                    position = jitter(position);
                    send_binary(&client, &base_url, &device_id, position).await?;
                    println!(
                        "{}",
                        format!("   paquete {}/{} enviado", i + 1, count).dimmed()
                    );
                    tokio::time::sleep(Duration::from_millis(500)).await;
                }
            }
            "4" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
            }
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String, io::Error> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

/// Desplazamiento aleatorio pequeño, como un vehículo en ciudad
fn jitter((lat, lng): (f64, f64)) -> (f64, f64) {
    let mut rng = rand::thread_rng();
    (
        lat + rng.gen_range(-0.002..0.002),
        lng + rng.gen_range(-0.002..0.002),
    )
}

fn random_speed() -> f32 {
    rand::thread_rng().gen_range(0.0..90.0)
}

async fn send_json(
    client: &reqwest::Client,
    base_url: &str,
    device_id: &str,
    (lat, lng): (f64, f64),
) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .post(format!("{}/gps/data", base_url))
        .json(&json!({
            "device_id": device_id,
            "latitude": lat,
            "longitude": lng,
            "speed": random_speed(),
        }))
        .send()
        .await?;

    report(response).await
}

async fn send_binary(
    client: &reqwest::Client,
    base_url: &str,
    device_id: &str,
    position: (f64, f64),
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = encode_frame(device_id, position, random_speed())?;

    let response = client
        .post(format!("{}/gps/binary_data", base_url))
        .body(payload)
        .send()
        .await?;

    report(response).await
}

/// Construir el frame de 40 bytes y comprimirlo con zlib, igual que el firmware
fn encode_frame(
    device_id: &str,
    (lat, lng): (f64, f64),
    speed: f32,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as u32;

    let mut frame = vec![0u8; FRAME_LEN];
    let id_bytes = device_id.as_bytes();
    if id_bytes.len() > 16 {
        return Err("device id de más de 16 bytes".into());
    }
    frame[..id_bytes.len()].copy_from_slice(id_bytes);
    frame[16..24].copy_from_slice(&lat.to_le_bytes());
    frame[24..32].copy_from_slice(&lng.to_le_bytes());
    frame[32..36].copy_from_slice(&speed.to_le_bytes());
    frame[36..40].copy_from_slice(&timestamp.to_le_bytes());

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&frame)?;
    Ok(encoder.finish()?)
}

async fn report(response: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status.is_success() {
        println!("{} {}", "✅".green(), body.green());
    } else {
        println!("{} {} {}", "❌".red(), status.to_string().red(), body.red());
    }
    Ok(())
}
