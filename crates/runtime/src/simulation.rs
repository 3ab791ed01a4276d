//! The per-frame simulation state machine.
//!
//! A [`Session`] owns the whole mutable state of one playthrough: the world
//! cache, the player, transient VFX state, and the transition controller.
//! The host calls [`Session::advance`] once per display frame with the real
//! elapsed seconds; everything else (input, event draining, snapshots)
//! happens between frames.
//!
//! Frame order is fixed: terminal checks, VFX decay, input resolution,
//! unstuck recovery, axis-separated movement, boundary crossing, enemy
//! steering and combat, deaths and loot, pickups. Combat and pickups measure
//! distance against a single player-position snapshot taken at the top of
//! the frame, so a frame is internally consistent even though movement has
//! already been applied.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use realms_core::populate::{easter_egg_item, random_appearance};
use realms_core::{
    Coordinate, Difficulty, EnemyRank, EntityId, EquippedWeapon, GameConfig, GenContext,
    GridDimensions, IdAllocator, Item, ItemId, ItemKind, PlacedItem, Player, SeededRng, Stats,
    Vec2, apply_damage, damage, loot_item, plan_highway,
};

use crate::events::{AudioCue, DamageNumber, DamageTint, FrameEvents, MessageLog, MusicRequest};
use crate::input::InputState;
use crate::snapshot::FrameSnapshot;
use crate::transition::{PendingArrival, TransitionController, TransitionKind};
use crate::world::WorldCache;

/// Spiral search bound for unstuck recovery, in tiles.
const UNSTUCK_SEARCH_RADIUS: i64 = 8;

/// Seconds a floating damage number or hit flash stays visible.
const VFX_LIFETIME: f64 = 1.0;

/// Music cross-fade on a map change, seconds.
const MUSIC_FADE: f32 = 0.3;

/// Terminal (or not) state of a session, latched once reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Playing,
    /// The Rift Lord fell.
    Victory,
    /// The player's health hit zero.
    Defeat,
    /// The flagged easter-egg item was carried back to the start coordinate.
    AltEnding,
}

/// One playthrough of the infinite maze world.
pub struct Session {
    config: GameConfig,
    difficulty: Difficulty,
    ctx: GenContext,
    world: WorldCache,
    player: Player,
    coordinate: Coordinate,
    ids: IdAllocator,
    /// The intentionally unseeded channel: item scatter, loot rolls,
    /// cosmetic choices, transition styles.
    scatter_rng: SeededRng,
    input: InputState,
    transitions: TransitionController,
    /// Item ids already granted on the current coordinate visit.
    collected: HashSet<ItemId>,
    /// Session clock of the last combat exchange, per enemy.
    combat_cooldowns: HashMap<EntityId, f64>,
    screen_shake: f32,
    hit_flashes: HashMap<EntityId, f64>,
    damage_numbers: Vec<DamageNumber>,
    messages: MessageLog,
    events: FrameEvents,
    /// Real elapsed session time in seconds, advanced by the raw
    /// (unclamped) frame delta.
    clock: f64,
    outcome: Outcome,
    /// Times the unstuck recovery fired; a nonzero value flags generator or
    /// transition placement bugs worth investigating.
    unstuck_recoveries: u32,
}

impl Session {
    /// Starts a session with an entropy-seeded scatter channel.
    pub fn new(config: GameConfig, difficulty: Difficulty, root_seed: u32) -> Self {
        Self::with_scatter_seed(config, difficulty, root_seed, rand::random())
    }

    /// Starts a session with an explicit scatter seed, making even the
    /// normally unseeded channels reproducible. Intended for tests and
    /// replay tooling.
    pub fn with_scatter_seed(
        config: GameConfig,
        difficulty: Difficulty,
        root_seed: u32,
        scatter_seed: u32,
    ) -> Self {
        let highway = plan_highway(
            GameConfig::START_COORDINATE,
            &[
                GameConfig::EASTER_EGG_COORDINATE,
                GameConfig::FINAL_BOSS_COORDINATE,
            ],
            root_seed,
        );
        let ctx = GenContext::new(
            root_seed,
            highway,
            GridDimensions::new(config.map_width_tiles, config.map_height_tiles),
        );

        let mut scatter_rng = SeededRng::new(scatter_seed);
        let stats = Stats {
            max_health: 100,
            attack: 10,
            defense: 5,
            speed: 180.0,
        };
        let player = Player {
            id: EntityId::PLAYER,
            appearance: random_appearance(&mut scatter_rng),
            stats,
            current_health: stats.max_health,
            position: Vec2::new(config.world_width() / 2.0, config.world_height() / 2.0),
            inventory: Vec::new(),
            equipped_weapon: None,
        };

        let mut session = Self {
            config,
            difficulty,
            ctx,
            world: WorldCache::new(),
            player,
            coordinate: GameConfig::START_COORDINATE,
            ids: IdAllocator::new(),
            scatter_rng,
            input: InputState::new(),
            transitions: TransitionController::new(),
            collected: HashSet::new(),
            combat_cooldowns: HashMap::new(),
            screen_shake: 0.0,
            hit_flashes: HashMap::new(),
            damage_numbers: Vec::new(),
            messages: MessageLog::new(),
            events: FrameEvents::default(),
            clock: 0.0,
            outcome: Outcome::Playing,
            unstuck_recoveries: 0,
        };

        session
            .messages
            .push("A rift has opened! A powerful being threatens the realms.");
        session
            .messages
            .push("You must travel to coordinates 10,10 and defeat the Rift Lord!");
        session.messages.push("Welcome to the Procedural Realms!");
        session.events.push_music(MusicRequest::Start {
            coordinate: session.coordinate,
            fade_in: None,
        });
        session.ensure_current_map();
        tracing::info!(root_seed, difficulty = %difficulty, "session started");
        session
    }

    /// Runs one simulated frame. `frame_dt` is the real elapsed time in
    /// seconds since the previous call; the simulation clamps its own copy
    /// but transitions and the clock consume it raw.
    pub fn advance(&mut self, frame_dt: f32) -> Outcome {
        if self.outcome != Outcome::Playing {
            return self.outcome;
        }
        self.clock += f64::from(frame_dt);

        // A running transition pauses the simulation entirely; only its
        // progress moves, and the coordinate switch commits at the midpoint.
        if self.transitions.is_active() {
            let tick = self.transitions.advance(frame_dt);
            if let Some(arrival) = tick.midpoint {
                self.commit_arrival(arrival);
            }
            return self.outcome;
        }

        let dt = frame_dt.min(GameConfig::MAX_DELTA_TIME);

        if self.coordinate == GameConfig::START_COORDINATE
            && self
                .player
                .inventory
                .iter()
                .any(|item| item.kind == ItemKind::EasterEgg)
        {
            tracing::info!("flagged item returned to the start coordinate");
            self.events.push_music(MusicRequest::Stop {
                fade_out: Some(1.0),
            });
            self.outcome = Outcome::AltEnding;
            return self.outcome;
        }

        if self.player.current_health == 0 {
            self.messages.push("You have fallen. The realms go dark.");
            self.events.push_audio(AudioCue::Defeat);
            self.events.push_music(MusicRequest::Stop {
                fade_out: Some(1.0),
            });
            tracing::info!("player defeated");
            self.outcome = Outcome::Defeat;
            return self.outcome;
        }

        self.ensure_current_map();

        let now = self.clock;
        self.screen_shake = (self.screen_shake - 1.0).max(0.0);
        self.damage_numbers
            .retain(|number| now - number.timestamp < VFX_LIFETIME);
        self.hit_flashes
            .retain(|_, timestamp| now - *timestamp < VFX_LIFETIME);

        // Combat and pickups below all measure against this one position.
        let player_position = self.player.position;

        // Unstuck: generation quirks or a bad spawn can leave the player
        // inside a wall; relocate and give the frame up.
        {
            let grid = &self.world.record(self.coordinate).grid;
            if grid.collides(player_position, GameConfig::PLAYER_SIZE) {
                let tile_x = (player_position.x / GameConfig::TILE_SIZE) as i64;
                let tile_y = (player_position.y / GameConfig::TILE_SIZE) as i64;
                let rescue = grid
                    .nearest_open_tile(tile_x, tile_y, UNSTUCK_SEARCH_RADIUS)
                    .map(|(x, y)| {
                        Vec2::new(
                            x as f32 * GameConfig::TILE_SIZE,
                            y as f32 * GameConfig::TILE_SIZE,
                        )
                    })
                    .unwrap_or_else(|| grid.world_center());
                self.unstuck_recoveries += 1;
                tracing::warn!(
                    from = ?player_position,
                    to = ?rescue,
                    total = self.unstuck_recoveries,
                    "player overlapped a wall; relocated"
                );
                self.player.position = rescue;
                return self.outcome;
            }
        }

        // Axis-separated movement: accept each axis independently so the
        // player slides along walls instead of sticking.
        let travel = self.player.stats.speed * dt;
        let direction = self.input.resolve(player_position, travel);
        {
            let grid = &self.world.record(self.coordinate).grid;
            let mut position = self.player.position;

            let horizontal = Vec2::new(position.x + direction.x * travel, position.y);
            if !grid.collides(horizontal, GameConfig::PLAYER_SIZE) {
                position.x = horizontal.x;
            }
            let vertical = Vec2::new(position.x, position.y + direction.y * travel);
            if !grid.collides(vertical, GameConfig::PLAYER_SIZE) {
                position.y = vertical.y;
            }
            self.player.position = position;
        }

        if let Some(arrival) = self.boundary_crossing() {
            let kind = *self.scatter_rng.pick(&TransitionKind::ALL);
            match self.transitions.request(kind, arrival) {
                Ok(()) => {
                    self.events.push_music(MusicRequest::Stop {
                        fade_out: Some(MUSIC_FADE),
                    });
                    tracing::debug!(to = %arrival.coordinate, ?kind, "map transition requested");
                }
                Err(err) => tracing::debug!(%err, "transition request dropped"),
            }
            return self.outcome;
        }

        self.steer_and_fight(player_position, dt, now);
        self.resolve_deaths();
        if self.outcome != Outcome::Playing {
            return self.outcome;
        }
        self.resolve_pickups(player_position);

        self.outcome
    }

    /// Read-only view of this frame for the rendering collaborator.
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        let record = self.world.record(self.coordinate);
        FrameSnapshot {
            player: &self.player,
            coordinate: self.coordinate,
            grid: &record.grid,
            palette: &record.palette,
            items: &record.items,
            enemies: &record.enemies,
            screen_shake: self.screen_shake,
            hit_flashes: &self.hit_flashes,
            damage_numbers: &self.damage_numbers,
            move_target: self.input.move_target(),
            transition: self.transitions.view(),
            messages: &self.messages,
            outcome: self.outcome,
        }
    }

    /// Takes everything queued for the audio collaborator this frame.
    pub fn drain_events(&mut self) -> FrameEvents {
        self.events.drain()
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Direct player access for hosts that teleport or respawn; gameplay
    /// itself never needs this.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Session clock in seconds.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn world(&self) -> &WorldCache {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldCache {
        &mut self.world
    }

    /// How many times the player had to be relocated out of a wall.
    pub fn unstuck_recoveries(&self) -> u32 {
        self.unstuck_recoveries
    }

    fn ensure_current_map(&mut self) {
        self.world.get_or_create(
            self.coordinate,
            &self.config,
            &self.ctx,
            self.difficulty,
            &mut self.scatter_rng,
            &mut self.ids,
        );
    }

    /// Arrival bookkeeping for the current coordinate, including the farm
    /// ratchet for cleared rooms. Runs on map changes only.
    fn visit_current_map(&mut self) {
        self.world.visit(
            self.coordinate,
            &self.config,
            &self.ctx,
            self.difficulty,
            &mut self.scatter_rng,
            &mut self.ids,
        );
    }

    /// Detects the player's box leaving the grid and derives the target
    /// coordinate plus the spawn position inset from the entered edge.
    fn boundary_crossing(&self) -> Option<PendingArrival> {
        let position = self.player.position;
        let limit_x = self.config.world_width() - GameConfig::PLAYER_SIZE;
        let limit_y = self.config.world_height() - GameConfig::PLAYER_SIZE;
        let margin = GameConfig::SPAWN_MARGIN;

        let (coordinate, spawn) = if position.x > limit_x {
            (
                Coordinate::new(self.coordinate.x + 1, self.coordinate.y),
                Vec2::new(margin, position.y),
            )
        } else if position.x < 0.0 {
            (
                Coordinate::new(self.coordinate.x - 1, self.coordinate.y),
                Vec2::new(limit_x - margin, position.y),
            )
        } else if position.y > limit_y {
            (
                Coordinate::new(self.coordinate.x, self.coordinate.y + 1),
                Vec2::new(position.x, margin),
            )
        } else if position.y < 0.0 {
            (
                Coordinate::new(self.coordinate.x, self.coordinate.y - 1),
                Vec2::new(position.x, limit_y - margin),
            )
        } else {
            return None;
        };
        Some(PendingArrival { coordinate, spawn })
    }

    /// Finishes a transition's midpoint: switch coordinates, move the
    /// player, reset the pickup memory for the new map.
    fn commit_arrival(&mut self, arrival: PendingArrival) {
        self.coordinate = arrival.coordinate;
        self.player.position = arrival.spawn;
        self.collected.clear();
        self.input.clear_move_target();
        self.visit_current_map();
        self.events.push_music(MusicRequest::Start {
            coordinate: arrival.coordinate,
            fade_in: Some(MUSIC_FADE),
        });
        tracing::debug!(coordinate = %arrival.coordinate, "map transition committed");
    }

    /// Enemy steering plus per-pair combat on a ≥1s cooldown. Both sides of
    /// an exchange resolve in the same tick.
    fn steer_and_fight(&mut self, player_position: Vec2, dt: f32, now: f64) {
        let player_attack = self.player.effective_attack();
        let player_defense = self.player.stats.defense;

        let record = self.world.record_mut(self.coordinate);
        for enemy in &mut record.enemies {
            let distance = enemy.position.distance(player_position);

            if distance < enemy.detection_range && distance > enemy.size * 0.8 {
                let toward = (player_position - enemy.position).normalized();
                enemy.position = enemy.position + toward * (enemy.stats.speed * dt);
            }

            if distance < enemy.size {
                let last = self
                    .combat_cooldowns
                    .get(&enemy.id)
                    .copied()
                    .unwrap_or(f64::NEG_INFINITY);
                if now - last < GameConfig::COMBAT_COOLDOWN {
                    continue;
                }
                self.combat_cooldowns.insert(enemy.id, now);

                let taken = damage(enemy.stats.attack, player_defense);
                self.player.current_health = apply_damage(self.player.current_health, taken);
                self.screen_shake = 10.0;
                self.hit_flashes.insert(EntityId::PLAYER, now);
                self.damage_numbers.push(DamageNumber {
                    text: format!("-{taken}"),
                    position: Vec2::new(
                        player_position.x + GameConfig::PLAYER_SIZE / 2.0,
                        player_position.y,
                    ),
                    timestamp: now,
                    tint: DamageTint::Incoming,
                });
                self.messages.push(format!("💥 Took {taken} damage!"));
                self.events.push_audio(AudioCue::PlayerHit);

                let dealt = damage(player_attack, enemy.stats.defense);
                enemy.current_health = apply_damage(enemy.current_health, dealt);
                self.hit_flashes.insert(enemy.id, now);
                self.damage_numbers.push(DamageNumber {
                    text: format!("-{dealt}"),
                    position: Vec2::new(enemy.position.x + enemy.size / 2.0, enemy.position.y),
                    timestamp: now,
                    tint: DamageTint::Outgoing,
                });
                self.messages.push(format!("⚔️ Dealt {dealt} damage!"));
                self.events.push_audio(AudioCue::EnemyHit);
            }
        }
    }

    /// Removes dead enemies, rolls their loot, and detects the win.
    fn resolve_deaths(&mut self) {
        let record = self.world.record_mut(self.coordinate);
        let mut survivors = Vec::with_capacity(record.enemies.len());

        for enemy in record.enemies.drain(..) {
            if enemy.current_health > 0 {
                survivors.push(enemy);
                continue;
            }
            self.combat_cooldowns.remove(&enemy.id);

            if enemy.rank == EnemyRank::RiftLord {
                self.messages.push("👑 THE RIFT LORD IS VANQUISHED!");
                self.events.push_music(MusicRequest::Stop {
                    fade_out: Some(1.0),
                });
                tracing::info!("rift lord defeated; session won");
                self.outcome = Outcome::Victory;
                continue;
            }

            self.messages.push(if enemy.is_boss() {
                "💀 Boss vanquished!"
            } else {
                "💀 Enemy vanquished!"
            });
            if enemy.is_boss() || self.scatter_rng.chance(0.7) {
                let item = loot_item(enemy.is_boss(), &mut self.scatter_rng, &mut self.ids);
                record.items.push(PlacedItem {
                    item,
                    position: enemy.position,
                });
            }
        }
        record.enemies = survivors;
    }

    /// Grants items within pickup radius, deduplicated by id for the
    /// current coordinate visit.
    fn resolve_pickups(&mut self, player_position: Vec2) {
        let mut granted: Vec<Item> = Vec::new();
        {
            let record = self.world.record_mut(self.coordinate);
            let mut remaining = Vec::with_capacity(record.items.len());
            for placed in record.items.drain(..) {
                let reachable =
                    placed.position.distance(player_position) < GameConfig::PICKUP_RADIUS;
                if !reachable || self.collected.contains(&placed.item.id) {
                    remaining.push(placed);
                    continue;
                }
                self.collected.insert(placed.item.id);
                // The container substitutes the flagged item for itself.
                let item = if placed.item.kind == ItemKind::GlitchedContainer {
                    easter_egg_item(&mut self.ids)
                } else {
                    placed.item
                };
                granted.push(item);
            }
            record.items = remaining;
        }

        for item in granted {
            self.messages.push(format!("⭐ Picked up {}!", item.name));
            self.events.push_audio(AudioCue::Pickup);
            self.grant_item(item);
        }
    }

    fn grant_item(&mut self, item: Item) {
        match &item.kind {
            ItemKind::Weapon(data) => {
                let stronger = self
                    .player
                    .equipped_weapon
                    .as_ref()
                    .map_or(true, |weapon| data.damage > weapon.damage);
                if stronger {
                    self.player.equipped_weapon =
                        Some(EquippedWeapon::from_weapon(&item.name, *data));
                    self.messages.push(format!("Equipped {}.", item.name));
                }
            }
            ItemKind::Upgrade(boost) => {
                self.player.stats.max_health += boost.max_health;
                self.player.stats.attack += boost.attack;
                self.player.stats.defense += boost.defense;
                self.player.stats.speed += boost.speed;
                // Every upgrade heals at least a little.
                let heal = if boost.max_health > 0 {
                    boost.max_health
                } else {
                    10
                };
                self.player.current_health =
                    (self.player.current_health + heal).min(self.player.stats.max_health);
            }
            ItemKind::EasterEgg | ItemKind::GlitchedContainer => {}
        }
        self.player.inventory.push(item);
    }
}
