#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIG MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleTimer,
    PromptFocusMinutes,
    PromptBreakMinutes,
    PromptSound,
    PromptRecentLimit,
    ValueOutOfRange(u32, u32), // min, max

    // === SESSION MESSAGES ===
    LoggedIn(String),
    AlreadyLoggedIn(String),
    LoggedOut(String),
    NotLoggedIn,
    LoginRequired,
    EmptyUserId,
    RecordsNotSaved,

    // === TIMER MESSAGES ===
    TimerStarted(String, String), // phase, clock
    TimerResumed,
    TimerAlreadyRunning,
    TimerPaused(String), // clock
    TimerNotRunning,
    TimerStopped(String), // phase
    TimerStatus(String),
    TimerHelp,
    TimerQuit,
    TaskLabelSet(String),
    TaskLabelCleared,
    FocusLengthSet(u32),
    BreakLengthSet(u32),
    FocusCompleted(String), // label
    BreakCompleted,
    CycleClosed,
    RecentTasks(Vec<String>),
    TodaySummary(u64, u64, u32), // focus minutes, break minutes, daily goal percent
    UnknownTimerCommand(String),
    InvalidMinutes(String),

    // === HISTORY MESSAGES ===
    HistoryHeader,
    NoSessionsFound,
    PageInfo(usize, usize), // page, total
    CalendarHeader(String),
    InvalidDate(String),
    InvalidMonth(String),

    // === STATS MESSAGES ===
    StatsHeader(String),
    NoRecordsForTask(String),
    AvailableTasks(Vec<String>),

    // === GOAL MESSAGES ===
    GoalsHeader,
    NoGoalsFound,
    GoalCreated(String),
    GoalDeleted(i64),
    ConfirmDeleteGoal(i64),
    DeleteCancelled,
    StandingGoalsHeader,
    StandingGoalsSaved(u32, u32),
    GoalRejected(String),

    // === STORAGE MESSAGES ===
    StoreFailed(String),
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
}
