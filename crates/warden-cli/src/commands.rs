//! Command implementations for the warden CLI

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;

use warden_core::{
    evaluate_strength, generate_credential, is_weak, LockConfig, LockStatus, Strength,
    SubmitOutcome,
};
use warden_service::LockService;

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn confirm(message: &str) -> Result<bool> {
    let answer = prompt(&format!("{message} [y/N] "))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

fn strength_label(strength: Strength) -> &'static str {
    match strength {
        Strength::Empty => "(empty)",
        Strength::TooShort => "Too short",
        Strength::Weak => "Weak - Easy to guess",
        Strength::Strong => "Strong",
    }
}

/// Interactive keypad session. Digits accumulate in the buffer; an empty
/// line submits.
pub async fn unlock(service: &LockService) -> Result<()> {
    service.note_navigation("Keypad session started").await;

    println!("Enter the 4-digit password.");
    println!("Digits accumulate; empty line submits. b = backspace, c = clear, e = emergency lock, q = quit.");

    loop {
        if service.is_locked().await {
            let remaining = service.lockout_remaining_secs().await;
            let (mins, secs) = (remaining / 60, remaining % 60);
            println!("LOCKED - lockout ends in {mins:02}:{secs:02} (press Enter to refresh)");
        } else {
            let config = service.config().await;
            println!(
                "[{}] attempts {}/{}",
                "*".repeat(service.input_len().await),
                service.attempts_display().await,
                config.max_attempts
            );
        }

        let line = prompt("> ")?;
        match line.as_str() {
            "q" => break,
            "b" => {
                service.pop_digit().await;
            }
            "c" => {
                service.clear_input().await;
            }
            "e" => {
                service.emergency_lock().await;
                println!("EMERGENCY LOCK ACTIVATED!");
            }
            "" => {
                if service.is_locked().await {
                    continue;
                }
                match service.submit().await {
                    Ok(SubmitOutcome::Granted) => println!("ACCESS GRANTED! Door unlocked."),
                    Ok(SubmitOutcome::Denied { locked: true, .. }) => {
                        println!("SYSTEM LOCKED! Too many failed attempts.");
                    }
                    Ok(SubmitOutcome::Denied { remaining, .. }) => {
                        println!("Access denied. {remaining} attempts remaining.");
                    }
                    Err(e) => println!("{e}"),
                }
            }
            digits => {
                for c in digits.chars() {
                    if !service.push_digit(c).await {
                        println!("rejected: {c}");
                    }
                }
            }
        }
    }

    Ok(())
}

pub async fn status(service: &LockService) -> Result<()> {
    let config = service.config().await;
    let status = match service.status().await {
        LockStatus::Ready => "READY",
        LockStatus::Locked => "LOCKED",
    };

    println!("Status:          {status}");
    println!("Total failures:  {}", service.failure_count().await);
    println!(
        "Failed attempts: {}/{}",
        service.attempts_display().await,
        config.max_attempts
    );
    if service.is_locked().await {
        println!(
            "Lockout ends in: {}s",
            service.lockout_remaining_secs().await
        );
    }
    println!("Lockout time:    {}s", config.lockout_time);
    println!(
        "Audio feedback:  {}",
        if config.audio_feedback { "on" } else { "off" }
    );
    println!(
        "Haptic feedback: {}",
        if config.haptic_feedback { "on" } else { "off" }
    );

    Ok(())
}

pub async fn log_show(service: &LockService) -> Result<()> {
    service.note_navigation("Access log viewed").await;
    let raw = service.read_log_raw().await?;
    if raw.is_empty() {
        println!("No access logs found.");
    } else {
        print!("{raw}");
    }
    Ok(())
}

pub async fn log_clear(service: &LockService, yes: bool) -> Result<()> {
    if !yes && !confirm("Clear all access logs?")? {
        return Ok(());
    }
    service.clear_log().await?;
    println!("Logs cleared successfully.");
    Ok(())
}

pub async fn log_export(service: &LockService, dest: Option<PathBuf>) -> Result<()> {
    let dest = dest.unwrap_or_else(|| {
        PathBuf::from(format!(
            "access_log_export_{}.txt",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ))
    });
    service.export_log(&dest).await?;
    println!("Logs exported to {}", dest.display());
    Ok(())
}

/// Change the credential. Validations mirror the service's order so the
/// weak-credential confirmation only appears for otherwise-acceptable
/// input; the service re-validates on the way in.
pub async fn password_change(
    service: &LockService,
    old: Option<String>,
    new: Option<String>,
    confirm_pass: Option<String>,
) -> Result<()> {
    let old = match old {
        Some(v) => v,
        None => prompt("Current password: ")?,
    };
    let new = match new {
        Some(v) => v,
        None => prompt("New password: ")?,
    };
    let confirm_pass = match confirm_pass {
        Some(v) => v,
        None => prompt("Confirm new password: ")?,
    };

    let current = service.config().await;
    if old != current.password {
        println!("Current password is incorrect!");
        return Ok(());
    }
    if !LockConfig::is_valid_credential(&new) {
        println!("New password must be 4 digits!");
        return Ok(());
    }
    if new != confirm_pass {
        println!("New passwords don't match!");
        return Ok(());
    }
    if is_weak(&new) && !confirm("This password may be easy to guess. Use it anyway?")? {
        println!("Password unchanged.");
        return Ok(());
    }

    service.change_password(&old, &new, &confirm_pass).await?;
    println!("Password changed successfully!");
    Ok(())
}

pub fn password_generate() -> Result<()> {
    let credential = generate_credential();
    println!("{credential}");
    println!("Apply it with `warden password change`.");
    Ok(())
}

pub fn password_strength(candidate: &str) -> Result<()> {
    println!("{}", strength_label(evaluate_strength(candidate)));
    Ok(())
}

pub async fn settings_show(service: &LockService) -> Result<()> {
    let config = service.config().await;
    println!("max_attempts:    {}", config.max_attempts);
    println!("lockout_time:    {}s", config.lockout_time);
    println!("audio_feedback:  {}", config.audio_feedback);
    println!("haptic_feedback: {}", config.haptic_feedback);
    Ok(())
}

pub async fn settings_set(
    service: &LockService,
    max_attempts: Option<u32>,
    lockout_secs: Option<u64>,
    audio: Option<bool>,
    haptic: Option<bool>,
) -> Result<()> {
    if max_attempts.is_none() && lockout_secs.is_none() && audio.is_none() && haptic.is_none() {
        println!("Nothing to set. See `warden settings set --help`.");
        return Ok(());
    }

    if let Some(value) = max_attempts {
        service.set_max_attempts(value).await?;
        println!("max_attempts set to {value}");
    }
    if let Some(value) = lockout_secs {
        service.set_lockout_secs(value).await?;
        println!("lockout_time set to {value}s");
    }
    if let Some(value) = audio {
        service.set_audio_feedback(value).await?;
        println!("audio_feedback set to {value}");
    }
    if let Some(value) = haptic {
        service.set_haptic_feedback(value).await?;
        println!("haptic_feedback set to {value}");
    }

    Ok(())
}

pub async fn backup(service: &LockService) -> Result<()> {
    service.backup().await?;
    println!("Settings backed up successfully.");
    Ok(())
}

pub async fn restore(service: &LockService) -> Result<()> {
    let restored = service.restore().await?;
    println!(
        "Settings restored successfully (max_attempts {}, lockout_time {}s).",
        restored.max_attempts, restored.lockout_time
    );
    Ok(())
}

pub async fn reset(service: &LockService) -> Result<()> {
    service.reset_session().await;
    println!("System reset to default state.");
    Ok(())
}

/// Factory reset behind the double confirmation the core requires of its
/// caller.
pub async fn factory_reset(service: &LockService) -> Result<()> {
    if !confirm("This will reset ALL settings and logs! Are you absolutely sure?")? {
        return Ok(());
    }
    if !confirm("This cannot be undone! Continue?")? {
        return Ok(());
    }
    service.factory_reset().await?;
    println!("Factory reset complete!");
    Ok(())
}
