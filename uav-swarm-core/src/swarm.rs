//! Swarm coordinator
//!
//! The coordinator owns every agent, the global best, the target, the sensing
//! model and the random source. Each iteration runs three phases to
//! completion, in order:
//!
//! 1. **Personal-best refresh**: each agent adopts its current position as
//!    personal best if it is strictly fitter.
//! 2. **Global-best refresh**: a strict left-to-right scan over the agents,
//!    each compared against the *running* global best. On ties the earlier
//!    agent wins.
//! 3. **Velocity/position update**:
//!    ```text
//!    v = w·v + φp·rp∘(pbest - x) + φg·rg∘(gbest - x)
//!    x = x + v
//!    ```
//!    with `rp`, `rg` fresh uniform `[0, 1)^D` vectors per agent per
//!    iteration.
//!
//! A run is exactly `n_iterations` passes; there is no early exit.

use rand_core::RngCore;
use tracing::{debug, info, info_span, trace};

use crate::agent::Agent;
use crate::config::SwarmConfig;
use crate::observe::{IterationReport, NoopObserver, SearchObserver};
use crate::outcome::SearchOutcome;
use crate::rng::{rng_for, SwarmRng};
use crate::sensing::{SensingModel, SensorWeights};
use crate::vector::Vector;
use crate::{Error, Result};

/// Lifecycle of a search run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Constructed, no iteration performed
    Initialized,
    /// Some iterations completed, budget not yet exhausted
    Iterating { completed: usize },
    /// Iteration budget exhausted
    Terminated,
}

/// Particle swarm coordinator
#[derive(Debug)]
pub struct Swarm<R = SwarmRng> {
    config: SwarmConfig,
    model: SensingModel,
    agents: Vec<Agent>,
    global_best: Vector,
    target: Vector,
    rng: R,
    completed: usize,
    phase: SearchPhase,
}

impl Swarm<SwarmRng> {
    /// Random swarm and target, seeded from `config.seed` or OS entropy.
    pub fn new(config: SwarmConfig) -> Result<Self> {
        let rng = rng_for(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RngCore> Swarm<R> {
    /// Random swarm and target drawn from `rng`, sensing model built from `config.weights`.
    pub fn with_rng(config: SwarmConfig, rng: R) -> Result<Self> {
        let model = SensingModel::from_weights(&config.weights)?;
        Self::with_model(config, model, rng)
    }

    /// Random swarm and target drawn from `rng`, scored by a caller-supplied model.
    ///
    /// Agents are drawn first, in order, then the target.
    pub fn with_model(config: SwarmConfig, model: SensingModel, mut rng: R) -> Result<Self> {
        config.validate()?;
        let agents = (0..config.population_size)
            .map(|_| Agent::initialize(config.dimension, &mut rng))
            .collect();
        let target = Vector::random(config.dimension, &mut rng);
        Self::assemble(config, model, agents, target, rng)
    }

    /// Swarm starting from explicit agents and target.
    pub fn with_agents(
        config: SwarmConfig,
        agents: Vec<Agent>,
        target: Vector,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        if agents.len() != config.population_size {
            return Err(Error::invalid(format!(
                "expected {} agents, got {}",
                config.population_size,
                agents.len()
            )));
        }
        let expected = Vector::zeros(config.dimension);
        expected.ensure_same_dimension(&target)?;
        for agent in &agents {
            expected.ensure_same_dimension(agent.position())?;
            expected.ensure_same_dimension(agent.velocity())?;
            expected.ensure_same_dimension(agent.personal_best())?;
        }
        let all_finite = target.is_finite()
            && agents.iter().all(|a| {
                a.position().is_finite() && a.velocity().is_finite() && a.personal_best().is_finite()
            });
        if !all_finite {
            return Err(Error::invalid("agent and target coordinates must be finite"));
        }
        let model = SensingModel::from_weights(&config.weights)?;
        Self::assemble(config, model, agents, target, rng)
    }

    fn assemble(
        config: SwarmConfig,
        model: SensingModel,
        agents: Vec<Agent>,
        target: Vector,
        rng: R,
    ) -> Result<Self> {
        model.validate()?;

        // Global best starts at the fittest initial position, first agent on ties.
        let mut global_best = agents[0].position().clone();
        let mut best_fitness = model.estimate(&global_best, &target)?;
        for agent in &agents[1..] {
            let fitness = model.estimate(agent.position(), &target)?;
            if fitness < best_fitness {
                global_best.clone_from(agent.position());
                best_fitness = fitness;
            }
        }

        info!(
            population = config.population_size,
            dimension = config.dimension,
            n_iterations = config.n_iterations,
            initial_best_fitness = best_fitness,
            "swarm initialized"
        );

        Ok(Self {
            config,
            model,
            agents,
            global_best,
            target,
            rng,
            completed: 0,
            phase: SearchPhase::Initialized,
        })
    }

    /// Run the remaining iteration budget and report the global best.
    ///
    /// Calling `run` on a terminated swarm returns the same outcome again.
    pub fn run(&mut self) -> Result<SearchOutcome> {
        self.run_with_observer(&mut NoopObserver)
    }

    /// Like [`run`](Self::run), reporting each completed iteration to `observer`.
    pub fn run_with_observer<O>(&mut self, observer: &mut O) -> Result<SearchOutcome>
    where
        O: SearchObserver + ?Sized,
    {
        let span = info_span!(
            "swarm_run",
            population = self.config.population_size,
            dimension = self.config.dimension,
            n_iterations = self.config.n_iterations,
        );
        let _enter = span.enter();

        while self.completed < self.config.n_iterations {
            let report = self.step()?;
            observer.on_iteration(&report);
        }
        self.phase = SearchPhase::Terminated;

        let outcome = self.outcome()?;
        info!(
            iterations = self.completed,
            best_fitness = outcome.best_fitness,
            "swarm run complete"
        );
        Ok(outcome)
    }

    /// One full iteration: personal bests, global best, then kinematics.
    pub fn step(&mut self) -> Result<IterationReport> {
        self.refresh_personal_bests()?;
        let improved = self.refresh_global_best()?;
        self.update_velocities();

        self.completed += 1;
        self.phase = if self.completed >= self.config.n_iterations {
            SearchPhase::Terminated
        } else {
            SearchPhase::Iterating {
                completed: self.completed,
            }
        };

        let report = IterationReport {
            iteration: self.completed,
            global_best_fitness: self.fitness_of(&self.global_best)?,
            improved,
        };
        debug!(
            iteration = report.iteration,
            global_best_fitness = report.global_best_fitness,
            improved,
            "iteration complete"
        );
        Ok(report)
    }

    fn refresh_personal_bests(&mut self) -> Result<()> {
        let Self {
            agents,
            model,
            target,
            ..
        } = self;
        for agent in agents.iter_mut() {
            let current = model.estimate(agent.position(), target)?;
            let best = model.estimate(agent.personal_best(), target)?;
            if current < best {
                agent.adopt_position_as_best();
            }
        }
        Ok(())
    }

    /// Sequential scan; returns whether the global best moved.
    fn refresh_global_best(&mut self) -> Result<bool> {
        let Self {
            agents,
            model,
            target,
            global_best,
            ..
        } = self;
        let mut best_fitness = model.estimate(global_best, target)?;
        let mut improved = false;
        for (index, agent) in agents.iter().enumerate() {
            let fitness = model.estimate(agent.position(), target)?;
            if fitness < best_fitness {
                global_best.clone_from(agent.position());
                best_fitness = fitness;
                improved = true;
                trace!(agent = index, fitness, "global best improved");
            }
        }
        Ok(improved)
    }

    fn update_velocities(&mut self) {
        let Self {
            config,
            agents,
            global_best,
            rng,
            ..
        } = self;
        let dimension = config.dimension;
        for agent in agents.iter_mut() {
            let r_p = Vector::random(dimension, rng);
            let r_g = Vector::random(dimension, rng);
            let velocity: Vector = (0..dimension)
                .map(|i| {
                    let x = agent.position()[i];
                    let cognitive = config.cognitive * r_p[i] * (agent.personal_best()[i] - x);
                    let social = config.social * r_g[i] * (global_best[i] - x);
                    config.inertia * agent.velocity()[i] + cognitive + social
                })
                .collect();
            agent.set_velocity(velocity);
            agent.advance_position();
        }
    }

    /// Current global best with its fitness, and the target
    pub fn outcome(&self) -> Result<SearchOutcome> {
        Ok(SearchOutcome {
            best_position: self.global_best.clone(),
            best_fitness: self.fitness_of(&self.global_best)?,
            target: self.target.clone(),
        })
    }

    /// Channel weights in effect, as reported by the sensing model
    pub fn weights(&self) -> SensorWeights {
        self.model.weights()
    }

    /// Sensing estimate of `position` against this swarm's target
    pub fn fitness_of(&self, position: &Vector) -> Result<f64> {
        self.model.estimate(position, &self.target)
    }

    /// Agents in stable iteration order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Fittest position any agent has occupied so far
    pub fn global_best(&self) -> &Vector {
        &self.global_best
    }

    /// The stationary target
    pub fn target(&self) -> &Vector {
        &self.target
    }

    /// Sensing model scoring positions
    pub fn sensing_model(&self) -> &SensingModel {
        &self.model
    }

    /// Run configuration
    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Number of iterations performed so far
    pub fn iterations_completed(&self) -> usize {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    const EPS: f64 = 1e-12;

    fn one_dim(n_iterations: usize) -> SwarmConfig {
        SwarmConfig::builder()
            .population_size(1)
            .dimension(1)
            .n_iterations(n_iterations)
            .build()
            .unwrap()
    }

    fn agent(position: f64, velocity: f64) -> Agent {
        Agent::from_parts(Vector::from([position]), Vector::from([velocity])).unwrap()
    }

    #[test]
    fn zero_iterations_reports_initial_position() {
        let mut swarm = Swarm::with_agents(
            one_dim(0),
            vec![agent(0.2, 0.1)],
            Vector::from([0.9]),
            create_rng(0),
        )
        .unwrap();

        let outcome = swarm.run().unwrap();
        assert_eq!(outcome.best_position, Vector::from([0.2]));
        assert_eq!(outcome.target, Vector::from([0.9]));
        assert!((outcome.best_fitness - 0.84).abs() < EPS);
        assert_eq!(swarm.agents()[0].position(), &Vector::from([0.2]));
        assert_eq!(swarm.phase(), SearchPhase::Terminated);
    }

    #[test]
    fn lone_agent_at_rest_stays_put() {
        // Cognitive and social terms collapse to zero while the agent sits on
        // both bests, leaving only inertia (here zero).
        let mut swarm = Swarm::with_agents(
            one_dim(1),
            vec![agent(0.0, 0.0)],
            Vector::from([1.0]),
            create_rng(5),
        )
        .unwrap();

        let outcome = swarm.run().unwrap();
        let a = &swarm.agents()[0];
        assert_eq!(a.personal_best(), &Vector::from([0.0]));
        assert_eq!(outcome.best_position, Vector::from([0.0]));
        assert_eq!(a.velocity(), &Vector::from([0.0]));
        assert_eq!(a.position(), &Vector::from([0.0]));
    }

    #[test]
    fn lone_agent_coasts_on_inertia() {
        let mut swarm = Swarm::with_agents(
            one_dim(2),
            vec![agent(0.0, 0.2)],
            Vector::from([1.0]),
            create_rng(5),
        )
        .unwrap();

        swarm.step().unwrap();
        assert!((swarm.agents()[0].velocity()[0] - 0.1).abs() < EPS);
        assert!((swarm.agents()[0].position()[0] - 0.1).abs() < EPS);
        assert_eq!(swarm.global_best(), &Vector::from([0.0]));

        let report = swarm.step().unwrap();
        assert!(report.improved);
        assert!((swarm.global_best()[0] - 0.1).abs() < EPS);
        assert!((swarm.agents()[0].personal_best()[0] - 0.1).abs() < EPS);
        assert!((swarm.agents()[0].position()[0] - 0.15).abs() < EPS);
    }

    #[test]
    fn global_best_ties_go_to_first_agent() {
        let config = SwarmConfig::builder()
            .population_size(2)
            .dimension(1)
            .n_iterations(1)
            .build()
            .unwrap();
        let target = Vector::from([0.5]);

        let mut left_first = Swarm::with_agents(
            config.clone(),
            vec![agent(0.25, 0.0), agent(0.75, 0.0)],
            target.clone(),
            create_rng(1),
        )
        .unwrap();
        assert_eq!(left_first.run().unwrap().best_position, Vector::from([0.25]));

        let mut right_first = Swarm::with_agents(
            config,
            vec![agent(0.75, 0.0), agent(0.25, 0.0)],
            target,
            create_rng(1),
        )
        .unwrap();
        assert_eq!(right_first.run().unwrap().best_position, Vector::from([0.75]));
    }

    #[test]
    fn phase_follows_iteration_budget() {
        let config = SwarmConfig::builder()
            .population_size(3)
            .n_iterations(2)
            .build()
            .unwrap();
        let mut swarm = Swarm::with_rng(config, create_rng(8)).unwrap();
        assert_eq!(swarm.phase(), SearchPhase::Initialized);

        swarm.step().unwrap();
        assert_eq!(swarm.phase(), SearchPhase::Iterating { completed: 1 });

        swarm.run().unwrap();
        assert_eq!(swarm.phase(), SearchPhase::Terminated);
        assert_eq!(swarm.iterations_completed(), 2);
    }

    #[test]
    fn run_after_termination_is_stable() {
        let config = SwarmConfig::builder().n_iterations(5).seed(4).build().unwrap();
        let mut swarm = Swarm::new(config).unwrap();
        let first = swarm.run().unwrap();
        let second = swarm.run().unwrap();
        assert_eq!(first, second);
        assert_eq!(swarm.iterations_completed(), 5);
    }

    #[test]
    fn observer_sees_every_iteration() {
        let config = SwarmConfig::builder().n_iterations(7).seed(2).build().unwrap();
        let mut swarm = Swarm::new(config).unwrap();
        let mut seen = Vec::new();
        let mut record = |r: &IterationReport| seen.push(r.iteration);
        swarm.run_with_observer(&mut record).unwrap();
        assert_eq!(seen, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn with_agents_checks_population_and_dimensions() {
        let err = Swarm::with_agents(
            one_dim(1),
            vec![agent(0.0, 0.0), agent(1.0, 0.0)],
            Vector::from([0.5]),
            create_rng(0),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));

        let err = Swarm::with_agents(
            one_dim(1),
            vec![agent(0.0, 0.0)],
            Vector::from([0.5, 0.5]),
            create_rng(0),
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn with_agents_rejects_non_finite_state() {
        let err = Swarm::with_agents(
            one_dim(1),
            vec![agent(f64::NAN, 0.0)],
            Vector::from([0.5]),
            create_rng(0),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn supplied_model_scores_positions() {
        use crate::sensing::EuclideanChannel;

        let model = SensingModel::new().with_channel(EuclideanChannel::new("lidar"), 2.0);
        let config = SwarmConfig::builder().n_iterations(3).build().unwrap();
        let mut swarm = Swarm::with_model(config, model, create_rng(6)).unwrap();
        let outcome = swarm.run().unwrap();
        let expected = 2.0 * outcome.best_position.distance(&outcome.target).unwrap();
        assert!((outcome.best_fitness - expected).abs() < EPS);
        assert_eq!(swarm.sensing_model().channel_names().collect::<Vec<_>>(), ["lidar"]);
    }

    #[test]
    fn empty_sensing_model_is_rejected() {
        let err = Swarm::with_model(SwarmConfig::default(), SensingModel::new(), create_rng(0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn bad_channel_weights_are_rejected() {
        use crate::sensing::EuclideanChannel;

        for weight in [-1.0, f64::NAN, f64::INFINITY] {
            let model = SensingModel::new().with_channel(EuclideanChannel::new("sound"), weight);
            let err = Swarm::with_model(SwarmConfig::default(), model, create_rng(0)).unwrap_err();
            assert!(matches!(err, Error::InvalidConfiguration { .. }));
        }
    }

    #[test]
    fn weights_reflect_the_sensing_model() {
        use crate::sensing::EuclideanChannel;

        let swarm = Swarm::new(SwarmConfig::default()).unwrap();
        assert_eq!(swarm.weights(), SwarmConfig::default().weights);

        let model = SensingModel::new().with_channel(EuclideanChannel::new("lidar"), 2.0);
        let swarm = Swarm::with_model(SwarmConfig::default(), model, create_rng(6)).unwrap();
        assert_eq!(swarm.weights(), SensorWeights::empty().with("lidar", 2.0));
    }

    #[test]
    fn agents_with_short_velocity_never_reach_the_swarm() {
        let json = r#"[{"position":[0.1,0.2],"velocity":[0.3],"personal_best":[0.1,0.2]}]"#;
        assert!(serde_json::from_str::<Vec<Agent>>(json).is_err());

        let two_dim = Agent::from_parts(Vector::from([0.1, 0.2]), Vector::from([0.3, 0.0])).unwrap();
        let err = Swarm::with_agents(one_dim(1), vec![two_dim], Vector::from([0.5]), create_rng(0))
            .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn global_best_compares_against_running_best() {
        // Both agents start on the same spot and only coast, so on the second
        // pass the first agent (0.4) beats the seeded best and the second (0.3)
        // must be compared against 0.4, not against the seeded best.
        let config = SwarmConfig::builder()
            .population_size(2)
            .dimension(1)
            .n_iterations(2)
            .build()
            .unwrap();
        let mut swarm = Swarm::with_agents(
            config,
            vec![agent(0.0, 0.8), agent(0.0, 0.6)],
            Vector::from([1.0]),
            create_rng(3),
        )
        .unwrap();

        assert!(!swarm.step().unwrap().improved);
        let report = swarm.step().unwrap();
        assert!(report.improved);
        assert!((swarm.global_best()[0] - 0.4).abs() < EPS);
        assert!((report.global_best_fitness - 0.72).abs() < EPS);
    }

    #[test]
    fn same_pass_tie_keeps_earlier_agent() {
        // Without the social pull, each agent halves its velocity and lands
        // 0.25 from the target on opposite sides during the same pass.
        let config = SwarmConfig::builder()
            .population_size(2)
            .dimension(1)
            .n_iterations(2)
            .social(0.0)
            .build()
            .unwrap();
        let target = Vector::from([0.5]);

        let mut left_first = Swarm::with_agents(
            config.clone(),
            vec![agent(0.0, 0.5), agent(1.0, -0.5)],
            target.clone(),
            create_rng(9),
        )
        .unwrap();
        left_first.step().unwrap();
        assert!(left_first.step().unwrap().improved);
        assert_eq!(left_first.global_best(), &Vector::from([0.25]));

        let mut right_first = Swarm::with_agents(
            config,
            vec![agent(1.0, -0.5), agent(0.0, 0.5)],
            target,
            create_rng(9),
        )
        .unwrap();
        right_first.step().unwrap();
        assert!(right_first.step().unwrap().improved);
        assert_eq!(right_first.global_best(), &Vector::from([0.75]));
    }
}
