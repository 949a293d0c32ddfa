use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use log::{error, info, warn};
use poise::serenity_prelude as serenity;
use serenity::builder::CreateMessage;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use crate::amount::{Amount, ParseAmountError};
use crate::catalog::{payout_table, BetKind};
use crate::config::{config_path, ConfigData};
use crate::ledger::{Ledger, LedgerError};
use crate::roulette::Roulette;
use crate::settlement::{settle, Settlement};
use crate::slip::{BetSlip, SlipError};
use crate::validator::{validate, Selection, ValidationError};

type Context<'a> = poise::Context<'a, Data, anyhow::Error>;

pub struct Data {
    pub config: Arc<RwLock<ConfigData>>,
    pub ledger: Arc<RwLock<Ledger>>,
    config_path: PathBuf,
    slips: Mutex<HashMap<String, BetSlip>>,
    roulette: Mutex<Roulette>,
}

/// Problems reported back to the player instead of failing the command.
#[derive(Debug, Error)]
pub enum PlayError {
    #[error(transparent)]
    Amount(#[from] ParseAmountError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Slip(#[from] SlipError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("your slip is empty, place a wager with /bet first")]
    EmptySlip,
}

impl Data {
    pub async fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref().to_path_buf();
        let config = ConfigData::load(&config_path)
            .await
            .with_context(|| format!("reading {}", config_path.display()))?;
        let ledger = Ledger::load(&config.ledger_file, config.default_start_balance)
            .await
            .with_context(|| format!("reading {}", config.ledger_file.display()))?;
        Ok(Self::with_parts(config, config_path, ledger, Roulette::new()))
    }

    pub fn with_parts(config: ConfigData, config_path: PathBuf, ledger: Ledger, roulette: Roulette) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            ledger: Arc::new(RwLock::new(ledger)),
            config_path,
            slips: Mutex::new(HashMap::new()),
            roulette: Mutex::new(roulette),
        }
    }

    async fn save_config(&self) -> Result<()> {
        let config = self.config.read().await;
        config.save(&self.config_path).await
    }

    async fn save_ledger(&self) -> Result<()> {
        let path = self.config.read().await.ledger_file.clone();
        let ledger = self.ledger.read().await;
        ledger.save(path).await
    }

    /// Validates a wager and puts it on the player's slip.
    pub async fn place_bet(&self, account: &str, kind: BetKind, amount: &str, selection: &str) -> Result<String, PlayError> {
        let amount: Amount = amount.parse()?;
        let wager = validate(kind, amount, &Selection::parse(kind, selection))?;

        let mut ledger = self.ledger.write().await;
        let balance = ledger.open(account);
        let mut slips = self.slips.lock().await;
        let slip = slips.entry(account.to_string()).or_default();
        let summary = wager.to_string();
        slip.add(wager, balance)?;

        Ok(format!(
            "Wager added: {}. {} wager(s), {} staked.",
            summary,
            slip.len(),
            slip.total_stake()
        ))
    }

    pub async fn slip_summary(&self, account: &str) -> String {
        let slips = self.slips.lock().await;
        match slips.get(account).filter(|slip| !slip.is_empty()) {
            Some(slip) => {
                let lines: Vec<String> = slip
                    .wagers()
                    .iter()
                    .enumerate()
                    .map(|(i, wager)| format!("{}. {}", i + 1, wager))
                    .collect();
                format!("{}\nTotal stake: {}", lines.join("\n"), slip.total_stake())
            }
            None => "No wagers placed.".to_string(),
        }
    }

    pub async fn clear_slip(&self, account: &str) -> usize {
        self.slips
            .lock()
            .await
            .remove(account)
            .map_or(0, |slip| slip.len())
    }

    /// Spins and settles the player's slip, applying the net change in one step.
    pub async fn spin_for(&self, account: &str) -> Result<(Settlement, Amount), PlayError> {
        let mut ledger = self.ledger.write().await;
        ledger.open(account);
        let slip = self.slips.lock().await.remove(account).unwrap_or_default();
        if slip.is_empty() {
            return Err(PlayError::EmptySlip);
        }

        let result = self.roulette.lock().await.spin();
        let settlement = settle(slip.wagers().to_vec(), result);
        let balance = match ledger.apply_delta(account, settlement.total_delta) {
            Ok(balance) => balance,
            Err(err) => {
                error!(
                    "account {} spun {} but delta {} was not applied: {}; slip kept",
                    account, result, settlement.total_delta, err
                );
                self.slips.lock().await.insert(account.to_string(), slip);
                return Err(err.into());
            }
        };
        drop(ledger);

        info!(
            "account {} spun {}: {} wager(s), delta {}",
            account,
            result,
            settlement.outcomes.len(),
            settlement.total_delta
        );
        if let Err(err) = self.save_ledger().await {
            error!("failed to persist ledger: {:#}", err);
        }
        Ok((settlement, balance))
    }

    pub async fn balance_of(&self, account: &str) -> Amount {
        self.ledger.write().await.open(account)
    }

    pub async fn set_start_balance(&self, amount: &str) -> Result<Amount, PlayError> {
        let amount: Amount = amount.parse()?;
        self.ledger.write().await.set_start_balance(amount)?;
        self.config.write().await.default_start_balance = amount;
        Ok(amount)
    }
}

pub fn render_spin(settlement: &Settlement, balance: Amount) -> String {
    let mut lines = vec![format!(
        "The ball lands on **{}** ({}).",
        settlement.result,
        settlement.result.color()
    )];
    lines.extend(settlement.outcomes.iter().map(|o| o.to_string()));
    let sign = if settlement.total_delta.is_negative() { "" } else { "+" };
    lines.push(format!("Net: {}{}", sign, settlement.total_delta));
    lines.push(format!("New balance: {}", balance));
    lines.join("\n")
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum BetChoice {
    #[name = "Straight (one pocket, 35:1)"]
    Straight,
    #[name = "Split (two pockets, 17:1)"]
    Split,
    #[name = "Street (three pockets, 11:1)"]
    Street,
    #[name = "Corner (four pockets, 8:1)"]
    Corner,
    #[name = "Six Line (six pockets, 5:1)"]
    SixLine,
    #[name = "Red/Black (1:1)"]
    RedBlack,
    #[name = "Even/Odd (1:1)"]
    EvenOdd,
    #[name = "1-18/19-36 (1:1)"]
    LowHigh,
    #[name = "Dozen (2:1)"]
    Dozen,
    #[name = "Column (2:1)"]
    Column,
}

impl From<BetChoice> for BetKind {
    fn from(choice: BetChoice) -> Self {
        match choice {
            BetChoice::Straight => BetKind::Straight,
            BetChoice::Split => BetKind::Split,
            BetChoice::Street => BetKind::Street,
            BetChoice::Corner => BetKind::Corner,
            BetChoice::SixLine => BetKind::SixLine,
            BetChoice::RedBlack => BetKind::RedBlack,
            BetChoice::EvenOdd => BetKind::EvenOdd,
            BetChoice::LowHigh => BetKind::Low18High18,
            BetChoice::Dozen => BetKind::Dozen,
            BetChoice::Column => BetKind::Column,
        }
    }
}

fn account_of(ctx: &Context<'_>) -> String {
    ctx.author().id.to_string()
}

/// Places a wager on your slip for the next spin
#[poise::command(slash_command)]
async fn bet(
    ctx: Context<'_>,
    #[description = "Kind of wager"] kind: BetChoice,
    #[description = "Stake: 0.50, 1, 2, 5, 10 or 25"] amount: String,
    #[description = "Pockets like 14,15 or a choice like red, odd, 1-18, 13-24, 2"] selection: String,
) -> Result<()> {
    let reply = match ctx
        .data()
        .place_bet(&account_of(&ctx), kind.into(), &amount, &selection)
        .await
    {
        Ok(reply) => reply,
        Err(err) => format!("Wager rejected: {}", err),
    };
    ctx.say(reply).await?;
    Ok(())
}

/// Shows the wagers waiting for the next spin
#[poise::command(slash_command, prefix_command)]
async fn slip(ctx: Context<'_>) -> Result<()> {
    let summary = ctx.data().slip_summary(&account_of(&ctx)).await;
    ctx.say(summary).await?;
    Ok(())
}

/// Removes every wager from your slip
#[poise::command(slash_command, prefix_command)]
async fn clear(ctx: Context<'_>) -> Result<()> {
    let removed = ctx.data().clear_slip(&account_of(&ctx)).await;
    ctx.say(format!("Removed {} wager(s).", removed)).await?;
    Ok(())
}

/// Spins the wheel and settles your slip
#[poise::command(slash_command, prefix_command)]
async fn spin(ctx: Context<'_>) -> Result<()> {
    let (settlement, balance) = match ctx.data().spin_for(&account_of(&ctx)).await {
        Ok(done) => done,
        Err(err) => {
            ctx.say(err.to_string()).await?;
            return Ok(());
        }
    };
    ctx.say(render_spin(&settlement, balance)).await?;

    if let Some(log_channel_id) = ctx.data().config.read().await.log_channel {
        let content = format!(
            "{} spun {} and settled {} wager(s) for {}",
            ctx.author().name,
            settlement.result,
            settlement.outcomes.len(),
            settlement.total_delta
        );
        let channel_id = serenity::ChannelId::new(log_channel_id);
        if let Err(why) = channel_id
            .send_message(&ctx.serenity_context().http, CreateMessage::new().content(content))
            .await
        {
            warn!("could not post to log channel: {:?}", why);
        }
    }
    Ok(())
}

/// Shows your balance
#[poise::command(slash_command, prefix_command)]
async fn balance(ctx: Context<'_>) -> Result<()> {
    let balance = ctx.data().balance_of(&account_of(&ctx)).await;
    ctx.say(format!("Balance: {}", balance)).await?;
    Ok(())
}

/// Lists every wager kind and what it pays
#[poise::command(slash_command, prefix_command)]
async fn payouts(ctx: Context<'_>) -> Result<()> {
    ctx.say(payout_table()).await?;
    Ok(())
}

#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
async fn set_start_balance(
    ctx: poise::ApplicationContext<'_, Data, anyhow::Error>,
    #[description = "Balance for newly opened accounts"] amount: String,
) -> Result<()> {
    match ctx.data().set_start_balance(&amount).await {
        Ok(amount) => {
            ctx.data().save_config().await?;
            ctx.say(format!("Start balance set to {}", amount)).await?;
        }
        Err(err) => {
            ctx.say(err.to_string()).await?;
        }
    }
    Ok(())
}

#[poise::command(slash_command, guild_only, required_permissions = "ADMINISTRATOR")]
async fn set_log_channel(
    ctx: poise::ApplicationContext<'_, Data, anyhow::Error>,
    #[description = "Channel that receives spin results"] channel: serenity::Channel,
) -> Result<()> {
    if let serenity::Channel::Guild(channel) = channel {
        let mut config = ctx.data().config.write().await;
        config.log_channel = Some(channel.id.get());
        drop(config);
        ctx.data().save_config().await?;
        ctx.say(format!("Log channel set to {}", channel.name)).await?;
    } else {
        ctx.say("Please provide a valid guild text channel.").await?;
    }
    Ok(())
}

async fn event_handler(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, anyhow::Error>,
    _data: &Data,
) -> Result<()> {
    if let serenity::FullEvent::Ready { data_about_bot, .. } = event {
        info!("logged in as {}", data_about_bot.user.name);
    }
    Ok(())
}

pub async fn start() -> Result<()> {
    let token = std::env::var("DISCORD_TOKEN").context("missing DISCORD_TOKEN")?;
    let intents = serenity::GatewayIntents::non_privileged();
    let data = Data::load(config_path()).await?;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                bet(),
                slip(),
                clear(),
                spin(),
                balance(),
                payouts(),
                set_start_balance(),
                set_log_channel(),
            ],
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;
    client.start().await?;
    Ok(())
}
