//! User-facing strings.

pub const LOGIN_TITLE: &str = "Вход";
pub const LOGIN_IDENTIFIER: &str = "Логин или email";
pub const LOGIN_PASSWORD: &str = "Пароль";
pub const LOGIN_SUBMIT: &str = "Войти";
pub const LOGIN_PENDING: &str = "Вход...";
pub const LOGIN_REJECTED: &str = "Неверный логин или пароль";

pub const LOADING: &str = "Загрузка...";
pub const LOGOUT: &str = "Выйти";
pub const PUBLIC_VIEW: &str = "Публичный просмотр";
pub const OPEN_PUBLIC_VIEW: &str = "Открыть публичный просмотр";
pub const SHARE: &str = "Поделиться";
pub const COPY_LINK: &str = "Скопировать ссылку";
pub const HOME: &str = "На главную";

pub const ORGANIZATION: &str = "Организация";
pub const FLOOR: &str = "Этаж";
pub const FLOORS: &str = "Этажи";
pub const ROOMS: &str = "Комнаты";
pub const ROOM: &str = "Комната";
pub const ROOM_NOT_SELECTED: &str = "Не выбрана";
pub const FLOOR_MAP: &str = "Карта этажа";
pub const FLOOR_MAP_ALT: &str = "План этажа";
pub const MINI_MAP_ALT: &str = "Мини-карта";
pub const PANORAMA: &str = "Панорама";

pub const NO_ORGANIZATIONS_TITLE: &str = "Нет доступных организаций";
pub const NO_ORGANIZATIONS: &str = "У вас пока нет доступа ни к одной организации.";
pub const PUBLIC_NO_ORGANIZATIONS: &str =
    "У этого пользователя нет доступных организаций для просмотра";
pub const NO_FLOORS: &str = "Нет доступных этажей";
pub const NO_ROOMS: &str = "Нет доступных комнат";
pub const NO_FLOOR_MAP: &str = "Карта этажа не доступна";
pub const NO_PANORAMAS: &str = "Нет доступных панорам";
pub const NO_ROOM_PANORAMA: &str = "Панорама для этой комнаты не доступна";
pub const PANORAMA_LOAD_FAILED: &str = "Ошибка загрузки изображения панорамы";

pub const ERROR_TITLE: &str = "Ошибка";
pub const RELOAD: &str = "Обновить страницу";
pub const PUBLIC_LOAD_FAILED: &str = "Ошибка загрузки данных. Пожалуйста, попробуйте позже.";

pub const AUDIO_GUIDE: &str = "Аудиогид";
pub const FLOOR_AUDIO_GUIDE: &str = "Аудиогид этажа";
pub const AUDIO_PAUSE: &str = "Пауза";
pub const AUDIO_LOADING: &str = "загрузка...";

pub const LINK_COPIED: &str = "Ссылка скопирована!";
pub const LINK_COPY_RETRY: &str = "Не удалось скопировать ссылку. Попробуйте еще раз.";
pub const LINK_COPY_FAILED: &str = "Не удалось скопировать ссылку";

pub fn greeting(username: &str) -> String {
    format!("Привет, {username}!")
}

pub fn share_title(organization: &str) -> String {
    format!("Просмотр панорам организации \"{organization}\"")
}
